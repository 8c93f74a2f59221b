//! Tests for `ValueSet` and attribute values.

use super::{AttributeValue, Scalar, ValueSet};

mod optional_family {
    use super::*;

    #[test]
    fn none_scalar_is_omitted() {
        let values = ValueSet::empty().and_optional::<i64>("start-segment", None);
        assert!(values.is_empty());
    }

    #[test]
    fn empty_string_is_omitted() {
        let values = ValueSet::empty().and_optional("joiner", Some(""));
        assert!(!values.contains("joiner"));
    }

    #[test]
    fn present_values_are_kept_with_their_kind() {
        let values = ValueSet::empty()
            .and_optional("joiner", Some(","))
            .and_optional("maximum-segments", Some(3))
            .and_optional("reverse", Some(false));

        assert_eq!(
            values.get("joiner"),
            Some(&AttributeValue::Scalar(Scalar::Text(",".to_string())))
        );
        assert_eq!(
            values.get("maximum-segments"),
            Some(&AttributeValue::Scalar(Scalar::Int(3)))
        );
        assert_eq!(
            values.get("reverse"),
            Some(&AttributeValue::Scalar(Scalar::Bool(false)))
        );
    }

    #[test]
    fn empty_list_is_omitted() {
        let values = ValueSet::empty().and_list_optional("protocols", Vec::<String>::new());
        assert!(values.is_empty());
    }

    #[test]
    fn list_preserves_order() {
        let values = ValueSet::empty().and_list_optional("required-oids", ["3.4", "1.2"]);
        let list = values.get("required-oids").and_then(AttributeValue::as_list).unwrap();
        let rendered: Vec<String> = list.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["3.4", "1.2"]);
    }

    #[test]
    fn empty_nested_set_is_omitted() {
        let values = ValueSet::empty()
            .and_object_optional("credential-reference", Some(ValueSet::empty()))
            .and_object_optional("configuration", None);
        assert!(values.is_empty());
    }

    #[test]
    fn nested_set_is_embedded() {
        let nested = ValueSet::empty().and("clear-text", "secret");
        let values =
            ValueSet::empty().and_object_optional("credential-reference", Some(nested.clone()));
        assert_eq!(
            values.get("credential-reference").and_then(AttributeValue::as_nested),
            Some(&nested)
        );
    }
}

mod ordering {
    use super::*;

    #[test]
    fn names_follow_insertion_order() {
        let values = ValueSet::empty().and("b", 1).and("a", 2).and("c", 3);
        assert_eq!(values.names().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn second_write_overwrites_in_place() {
        let values = ValueSet::empty()
            .and("host", "one")
            .and("port", 1)
            .and("host", "two");

        assert_eq!(values.len(), 2);
        assert_eq!(values.names().collect::<Vec<_>>(), ["host", "port"]);
        assert_eq!(values.get("host").map(ToString::to_string).as_deref(), Some("two"));
    }

    #[test]
    fn json_object_keys_follow_insertion_order() {
        let values = ValueSet::empty().and("zeta", 1).and("alpha", true);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":true}"#);
    }
}

mod rendering {
    use super::*;

    #[test]
    fn scalars_render_naturally() {
        assert_eq!(Scalar::from(12345).to_string(), "12345");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from("text").to_string(), "text");
    }

    #[test]
    fn scalar_list_parameter_is_space_joined() {
        let list = AttributeValue::List(vec!["TLSv1.2".into(), "TLSv1.3".into()]);
        assert_eq!(list.to_parameter(), "TLSv1.2 TLSv1.3");
    }

    #[test]
    fn nested_parameter_is_json() {
        let nested = AttributeValue::Nested(ValueSet::empty().and("a", "b"));
        assert_eq!(nested.to_parameter(), r#"{"a":"b"}"#);
    }

    #[test]
    fn list_of_nested_parameter_is_json_array() {
        let list = AttributeValue::List(vec![
            AttributeValue::Nested(ValueSet::empty().and("realm-name", "a")),
            AttributeValue::Nested(ValueSet::empty().and("realm-name", "b")),
        ]);
        assert_eq!(
            list.to_parameter(),
            r#"[{"realm-name":"a"},{"realm-name":"b"}]"#
        );
    }

    #[test]
    fn nested_list_serializes_as_array_of_objects() {
        let values = ValueSet::empty().and_list_optional(
            "mechanism-configurations",
            vec![
                ValueSet::empty().and("mechanism-name", "BASIC"),
                ValueSet::empty().and("mechanism-name", "DIGEST"),
            ],
        );
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mechanism-configurations": [
                    {"mechanism-name": "BASIC"},
                    {"mechanism-name": "DIGEST"}
                ]
            })
        );
    }
}

mod from_json {
    use super::*;

    #[test]
    fn null_is_absent() {
        assert_eq!(AttributeValue::from_json(serde_json::Value::Null), None);
    }

    #[test]
    fn object_becomes_nested_set() {
        let value =
            AttributeValue::from_json(serde_json::json!({"clear-text": "pw", "alias": null}))
            .unwrap();
        let nested = value.as_nested().unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested.get("clear-text").map(ToString::to_string).as_deref(), Some("pw"));
    }

    #[test]
    fn numbers_become_integers() {
        assert_eq!(
            AttributeValue::from_json(serde_json::json!(42)),
            Some(AttributeValue::Scalar(Scalar::Int(42)))
        );
    }
}
