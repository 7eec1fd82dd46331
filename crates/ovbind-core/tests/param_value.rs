//! Parameter value decoding and accessors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ovbind_core::ParamValue;

#[test]
fn untagged_json_maps_to_variants() {
    let v: ParamValue = serde_json::from_str(r#"["A", 4, 2.5, true]"#).unwrap();
    let items = v.as_list().unwrap();
    assert_eq!(items[0].as_str(), Some("A"));
    assert_eq!(items[1].as_i64(), Some(4));
    assert_eq!(items[2].as_f64(), Some(2.5));
    assert_eq!(items[3].as_bool(), Some(true));
}

#[test]
fn accessors_do_not_coerce_across_kinds() {
    let v = ParamValue::from("4");
    assert_eq!(v.as_i64(), None);
    assert_eq!(v.as_bool(), None);
    assert_eq!(ParamValue::from(4_i64).as_f64(), Some(4.0));
    assert_eq!(ParamValue::from(4.5).as_i64(), None);
}

#[test]
fn display_renders_lists() {
    let v = ParamValue::List(vec!["CPU".into(), ParamValue::Int(1)]);
    assert_eq!(v.to_string(), "[CPU, 1]");
    assert_eq!(serde_json::to_string(&v).unwrap(), r#"["CPU",1]"#);
}
