//! Ordered converter registry and the conversion pipeline.

use super::builtin;
use super::error::Error;
use super::input::{format_object, Input};
use crate::value::{normalize, Canonical, Value};
use once_cell::sync::Lazy;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Converter turns one recognized input shape into a raw value.
///
/// A converter must return [`Error::TypeNotSupported`] for every input it does
/// not recognize so the registry can move on to the next one.
pub type Converter = Arc<dyn Fn(&dyn Any) -> Result<Value, Error> + Send + Sync>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// Registry holds an ordered list of converters.
///
/// The most recently registered converter is tried first. Reads proceed
/// concurrently; a registration excludes everything else while it runs.
pub struct Registry {
    converters: RwLock<Vec<Converter>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            converters: RwLock::new(Vec::new()),
        }
    }

    /// Creates a registry holding the built-in converters in their default
    /// trial order.
    pub fn with_builtins() -> Self {
        Registry {
            converters: RwLock::new(builtin::converters()),
        }
    }

    /// Returns the process-wide registry, initialising it with the built-in
    /// converters on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Registers a converter ahead of every previously registered one.
    pub fn register<F>(&self, converter: F)
    where
        F: Fn(&dyn Any) -> Result<Value, Error> + Send + Sync + 'static,
    {
        let mut converters = self
            .converters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        converters.insert(0, Arc::new(converter));

        tracing::debug!(count = converters.len(), "converter registered");
    }

    /// Returns the number of registered converters.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts an input into a canonical value.
    ///
    /// Converters are tried in registry order. The first success is normalized
    /// and returned; the first error other than the "type not supported"
    /// sentinel is returned as is.
    pub fn convert(&self, input: &dyn Input) -> Result<Canonical, Error> {
        let converters = self.snapshot();

        for (index, converter) in converters.iter().enumerate() {
            match converter(input.as_any()) {
                Ok(value) => {
                    tracing::trace!(index, kind = value.kind(), "converter matched");
                    return Ok(normalize(value));
                }
                Err(err) if err.is_type_not_supported() => {
                    tracing::trace!(index, "converter skipped");
                }
                Err(err) => return Err(err),
            }
        }

        Err(Error::UnsupportedType(format_object(input)))
    }

    // Converters run against a copy of the list so they may themselves
    // convert or register without deadlocking.
    fn snapshot(&self) -> Vec<Converter> {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("converters", &self.len())
            .finish()
    }
}

/// Registers a converter with the process-wide registry.
///
/// It is tried before every converter registered earlier, built-ins included.
pub fn register_converter<F>(converter: F)
where
    F: Fn(&dyn Any) -> Result<Value, Error> + Send + Sync + 'static,
{
    Registry::global().register(converter);
}

/// Converts an input into a canonical value using the process-wide registry.
pub fn convert(input: &dyn Input) -> Result<Canonical, Error> {
    Registry::global().convert(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;
    use std::sync::Barrier;
    use std::thread;

    #[derive(Debug)]
    struct Celsius(f32);

    fn celsius_converter(input: &dyn Any) -> Result<Value, Error> {
        let c = input
            .downcast_ref::<Celsius>()
            .ok_or(Error::TypeNotSupported)?;

        let mut fields = Map::new();
        fields.insert("celsius".to_string(), Value::from(c.0));
        Ok(Value::Map(fields))
    }

    #[test]
    fn test_empty_registry_reports_unsupported_type() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let err = registry.convert(&Celsius(1.0)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
        assert!(err.to_string().contains("Celsius"));
    }

    #[test]
    fn test_register_prepends() {
        let registry = Registry::new();
        registry.register(|_: &dyn Any| Ok(Value::List(vec![Value::from("first")])));
        registry.register(|_: &dyn Any| Ok(Value::List(vec![Value::from("second")])));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.convert(&()).unwrap(),
            Canonical::List(vec![Canonical::from("second")])
        );
    }

    #[test]
    fn test_result_is_normalized() {
        let registry = Registry::new();
        registry.register(celsius_converter);

        let value = registry.convert(&Celsius(21.5)).unwrap();
        assert_eq!(value.get("celsius"), Some(&Canonical::Float(21.5)));
    }

    #[test]
    fn test_sentinel_is_skipped() {
        let registry = Registry::new();
        registry.register(celsius_converter);
        registry.register(|_: &dyn Any| Err(Error::TypeNotSupported));

        assert!(registry.convert(&Celsius(0.0)).is_ok());
    }

    #[test]
    fn test_other_errors_short_circuit() {
        let registry = Registry::new();
        registry.register(celsius_converter);
        registry.register(|input: &dyn Any| match input.downcast_ref::<Celsius>() {
            Some(_) => Err(Error::custom("frozen")),
            None => Err(Error::TypeNotSupported),
        });

        let err = registry.convert(&Celsius(0.0)).unwrap_err();
        assert_eq!(err.to_string(), "frozen");
    }

    #[test]
    fn test_converter_may_reenter() {
        let registry = Arc::new(Registry::with_builtins());
        let inner = Arc::clone(&registry);
        registry.register(move |input: &dyn Any| {
            let c = input
                .downcast_ref::<Celsius>()
                .ok_or(Error::TypeNotSupported)?;
            inner.register(|_: &dyn Any| Err(Error::TypeNotSupported));
            let doc = format!(r#"{{"c": {}}}"#, c.0);
            inner.convert(&doc).map(Value::from)
        });

        let value = registry.convert(&Celsius(4.0)).unwrap();
        assert_eq!(value.get("c"), Some(&Canonical::Int(4)));
    }

    #[test]
    fn test_concurrent_register_and_convert() {
        const THREADS: usize = 8;
        const ITERATIONS: usize = 200;

        let registry = Arc::new(Registry::with_builtins());
        let builtins = registry.len();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..ITERATIONS {
                        if t % 2 == 0 {
                            registry.register(celsius_converter);
                        }
                        let doc = format!(r#"{{"thread": {}, "i": {}}}"#, t, i);
                        let value = registry.convert(&doc).unwrap();
                        assert_eq!(value.get("i"), Some(&Canonical::Int(i as isize)));

                        let value = registry.convert(&Celsius(1.5)).ok();
                        if t % 2 == 0 {
                            assert!(value.is_some());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), builtins + (THREADS / 2) * ITERATIONS);
        let value = registry.convert(&Celsius(1.5)).unwrap();
        assert_eq!(value.get("celsius"), Some(&Canonical::Float(1.5)));
    }
}
