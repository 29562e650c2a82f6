//! Tests for the conversion pipeline through the process-wide registry.

#[cfg(test)]
mod tests {
    use crate::convert::{convert, register_converter, Error, Input};
    use crate::jq;
    use crate::matcher::{expect, Matcher};
    use crate::value::{Canonical, Map, Value};
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;
    use std::any::Any;
    use std::collections::BTreeMap;
    use std::fmt;

    /// Test case for documents given as text.
    struct DocumentTestCase {
        name: &'static str,
        document: &'static str,
        expected: Result<Canonical, &'static str>,
    }

    fn map(entries: &[(&str, Canonical)]) -> Canonical {
        Canonical::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn run_document_test_case(tc: DocumentTestCase) {
        let inputs: [Box<dyn Input>; 3] = [
            Box::new(tc.document.to_string()),
            Box::new(tc.document),
            Box::new(tc.document.as_bytes().to_vec()),
        ];

        for input in inputs.iter() {
            let result = convert(&**input);
            match &tc.expected {
                Ok(expected) => assert_eq!(
                    result.as_ref().ok(),
                    Some(expected),
                    "{}: unexpected result for {:?}: {:?}",
                    tc.name,
                    input,
                    result
                ),
                Err(message) => {
                    let err = result.expect_err(tc.name);
                    assert!(
                        err.to_string().contains(message),
                        "{}: unexpected error {}",
                        tc.name,
                        err
                    );
                }
            }
        }
    }

    #[test]
    fn test_documents() {
        let cases = vec![
            DocumentTestCase {
                name: "mapping",
                document: r#"{"a":1}"#,
                expected: Ok(map(&[("a", Canonical::Int(1))])),
            },
            DocumentTestCase {
                name: "sequence",
                document: r#"["x","y"]"#,
                expected: Ok(Canonical::List(vec![
                    Canonical::from("x"),
                    Canonical::from("y"),
                ])),
            },
            DocumentTestCase {
                name: "nested numbers",
                document: r#"{"n": [-1, 2.5, {"m": 18446744073709551615}]}"#,
                expected: Ok(map(&[(
                    "n",
                    Canonical::List(vec![
                        Canonical::Int(-1),
                        Canonical::Float(2.5),
                        map(&[("m", Canonical::BigInt(BigInt::from(u64::MAX)))]),
                    ]),
                )])),
            },
            DocumentTestCase {
                name: "empty",
                document: "",
                expected: Err("a valid document is expected"),
            },
            DocumentTestCase {
                name: "bare number",
                document: "42",
                expected: Err("a mapping or sequence is required"),
            },
            DocumentTestCase {
                name: "null",
                document: "null",
                expected: Err("a mapping or sequence is required"),
            },
            DocumentTestCase {
                name: "malformed",
                document: r#"{"a":"#,
                expected: Err("unable to unmarshal result"),
            },
        ];

        for tc in cases {
            run_document_test_case(tc);
        }
    }

    #[test]
    fn test_empty_bytes() {
        let err = convert(&Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyDocument));
        assert_eq!(err.to_string(), "a valid document is expected");
    }

    #[test]
    fn test_unsupported_types() {
        #[derive(Debug)]
        struct Opaque {
            #[allow(dead_code)]
            field: u8,
        }

        let inputs: [Box<dyn Input>; 3] = [
            Box::new(5i32),
            Box::new(true),
            Box::new(Opaque { field: 1 }),
        ];
        for input in inputs.iter() {
            let err = convert(&**input).unwrap_err();
            assert!(matches!(err, Error::UnsupportedType(_)), "{:?}", input);
            assert!(err.to_string().starts_with("unsupported type:\n"));
        }

        let err = convert(&Opaque { field: 7 }).unwrap_err();
        assert!(err.to_string().contains("Opaque { field: 7 }"));
    }

    #[test]
    fn test_idempotent() {
        let input = r#"{"a": {"b": [1, "two", null, true]}}"#.to_string();
        assert_eq!(convert(&input).unwrap(), convert(&input).unwrap());
    }

    #[test]
    fn test_numeric_closure() {
        let mut fields = Map::new();
        fields.insert("i8".to_string(), Value::from(-8i8));
        fields.insert("u16".to_string(), Value::from(16u16));
        fields.insert("u64".to_string(), Value::from(u64::MAX));
        fields.insert("f32".to_string(), Value::from(0.5f32));
        fields.insert("i64".to_string(), Value::from(i64::MAX));

        let value = convert(&fields).unwrap();
        assert_eq!(value.get("i8"), Some(&Canonical::Int(-8)));
        assert_eq!(value.get("u16"), Some(&Canonical::Int(16)));
        assert_eq!(
            value.get("u64"),
            Some(&Canonical::BigInt(BigInt::from(u64::MAX)))
        );
        assert_eq!(value.get("f32"), Some(&Canonical::Float(0.5)));

        #[cfg(target_pointer_width = "64")]
        assert_eq!(value.get("i64"), Some(&Canonical::Int(i64::MAX as isize)));
        #[cfg(target_pointer_width = "32")]
        assert_eq!(
            value.get("i64"),
            Some(&Canonical::BigInt(BigInt::from(i64::MAX)))
        );
    }

    #[derive(Debug)]
    struct Widget {
        field: &'static str,
    }

    fn widget_converter(input: &dyn Any) -> Result<Value, Error> {
        let widget = input
            .downcast_ref::<Widget>()
            .ok_or(Error::TypeNotSupported)?;

        let mut fields = Map::new();
        fields.insert("field".to_string(), Value::from(widget.field));
        Ok(Value::Map(fields))
    }

    #[test]
    fn test_custom_converter_with_match() {
        register_converter(widget_converter);

        let widget = Widget { field: "v" };
        assert_eq!(
            convert(&widget).unwrap(),
            map(&[("field", Canonical::from("v"))])
        );

        expect(&widget).to(jq::matches(r#".field == "v""#));
        expect(&widget).to_not(jq::matches(r#".field == "w""#));
    }

    #[derive(Debug)]
    struct Gauge(u32);

    #[derive(Debug)]
    struct Overheated(u32);

    impl fmt::Display for Overheated {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "gauge overheated at {}", self.0)
        }
    }

    impl std::error::Error for Overheated {}

    #[test]
    fn test_custom_converter_precedence() {
        register_converter(|input: &dyn Any| {
            let gauge = input.downcast_ref::<Gauge>().ok_or(Error::TypeNotSupported)?;
            Ok(Value::List(vec![Value::from("older"), Value::from(gauge.0)]))
        });
        register_converter(|input: &dyn Any| match input.downcast_ref::<Gauge>() {
            Some(gauge) if gauge.0 > 100 => Err(Error::custom(Overheated(gauge.0))),
            Some(gauge) => Ok(Value::List(vec![Value::from("newer"), Value::from(gauge.0)])),
            None => Err(Error::TypeNotSupported),
        });

        assert_eq!(
            convert(&Gauge(3)).unwrap(),
            Canonical::List(vec![Canonical::from("newer"), Canonical::Int(3)])
        );

        let err = convert(&Gauge(120)).unwrap_err();
        assert_eq!(err.to_string(), "gauge overheated at 120");
        assert_eq!(err.downcast_custom::<Overheated>().map(|e| e.0), Some(120));

        let matcher = jq::matches(".[1] == 120");
        assert!(matcher.matches(&Gauge(120)).is_err());
    }

    #[derive(Debug)]
    struct Shadowed;

    #[test]
    fn test_custom_converter_overrides_builtin() {
        // Claims a single exact document and leaves every other string to the built-ins.
        register_converter(|input: &dyn Any| match input.downcast_ref::<String>() {
            Some(s) if s == "shadowed" => Ok(Value::List(vec![Value::from("overridden")])),
            _ => Err(Error::TypeNotSupported),
        });

        assert_eq!(
            convert(&"shadowed".to_string()).unwrap(),
            Canonical::List(vec![Canonical::from("overridden")])
        );
        assert_eq!(
            convert(&r#"["plain"]"#.to_string()).unwrap(),
            Canonical::List(vec![Canonical::from("plain")])
        );
        assert!(convert(&Shadowed).is_err());
    }
}
