use chrono::NaiveDate;
use num_bigint::BigInt;
use pglit::{
    parse_array, parse_array_with, parse_composite, parse_composite_decoded, serialize_array_with,
    serialize_composite_with, Array, ArrayOptions, Composite, CompositeOptions, DateCodec,
    DateSubtype, Dim, ElementCodec, FromStrCodec, IntSubtype, OutputMode, RangeBound, RangeType,
    TextCodec,
};

#[test]
fn test_three_dimensional_array_access() {
    let codec = FromStrCodec::<i64>::new();
    let array = parse_array("{{{1,2},{3,4}},{{5,6},{7,8}}}", &codec).unwrap();
    assert_eq!(array.ndim(), 3);
    assert_eq!(array.dims(), &[Dim::new(2), Dim::new(2), Dim::new(2)]);
    assert_eq!(array.get(&[1, 1, 1]), Some(&Some(1)));
    assert_eq!(array.get(&[2, 1, 2]), Some(&Some(6)));
    assert_eq!(array.get(&[2, 2, 2]), Some(&Some(8)));
    assert_eq!(array.get(&[3, 1, 1]), None);
}

#[test]
fn test_custom_bounds_indexing() {
    let codec = FromStrCodec::<i64>::new();
    let array = parse_array("[0:1][-3:-1]={{1,2,3},{4,5,6}}", &codec).unwrap();
    assert_eq!(array.get(&[0, -3]), Some(&Some(1)));
    assert_eq!(array.get(&[1, -1]), Some(&Some(6)));
    assert_eq!(array.get(&[2, -1]), None);
    assert_eq!(array.get(&[0, 0]), None);
}

#[test]
fn test_bigint_array() {
    let codec = FromStrCodec::<BigInt>::new();
    let array = parse_array("{170141183460469231731687303715884105727,NULL}", &codec).unwrap();
    assert_eq!(
        array.elements()[0],
        Some("170141183460469231731687303715884105727".parse().unwrap())
    );
    assert_eq!(array.elements()[1], None);
}

#[test]
fn test_array_cast_wrapping() {
    let codec = FromStrCodec::<i64>::new();
    let array = parse_array("{1,2}", &codec).unwrap();
    let options = ArrayOptions::new().with_cast("int4[]");
    assert_eq!(
        serialize_array_with(&array, &codec, &options).unwrap(),
        "'{1,2}'::int4[]"
    );
}

#[test]
fn test_composite_named_access_and_decode() {
    let row = parse_composite("(7,2024-06-01,)").unwrap();
    let row = Composite::with_names(row.fields().to_vec(), ["id", "day", "note"]).unwrap();
    assert_eq!(row.get("id"), Some(Some("7")));
    assert_eq!(row.get("note"), Some(None));
    assert_eq!(row.get("missing"), None);

    let int_codec = FromStrCodec::<i64>::new();
    let text_codec = TextCodec;
    let date_codec = DateCodec;
    // Heterogeneous rows decode per-position through trait objects once the
    // target value type is unified; here every column decodes to text.
    let codecs: Vec<&dyn ElementCodec<Value = String>> =
        vec![&text_codec, &text_codec, &text_codec];
    let values = parse_composite_decoded("(7,2024-06-01,)", &codecs).unwrap();
    assert_eq!(values[0].as_deref(), Some("7"));
    assert_eq!(values[2], None);

    // And scalar codecs handle their own columns directly.
    assert_eq!(int_codec.parse("7").unwrap(), 7);
    assert_eq!(
        date_codec.parse("2024-06-01").unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
}

#[test]
fn test_row_prefix_and_constructor_output() {
    let row = parse_composite("ROW(1,two)").unwrap();
    assert_eq!(row.len(), 2);

    let options = CompositeOptions::new()
        .with_mode(OutputMode::Constructor)
        .with_type_names(["int4", "text"]);
    assert_eq!(
        serialize_composite_with(&row, &options).unwrap(),
        "('1'::int4,'two'::text)"
    );
}

#[test]
fn test_date_range_end_to_end() {
    let ty = RangeType::new(DateSubtype);
    let codec = DateCodec;
    let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();

    let r = ty.parse("(2024-01-01,2024-01-05]", &codec).unwrap();
    // Discrete canonicalization: [Jan 2, Jan 6).
    assert_eq!(r.lower(), Some(&RangeBound::inclusive(day(1, 2))));
    assert_eq!(r.upper(), Some(&RangeBound::exclusive(day(1, 6))));
    assert_eq!(
        ty.to_text(&r, &codec).unwrap(),
        "[2024-01-02,2024-01-06)"
    );

    assert_eq!(ty.contains_element(&r, Some(&day(1, 5))), Some(true));
    assert_eq!(ty.contains_element(&r, Some(&day(1, 6))), Some(false));
    assert_eq!(ty.contains_element(&r, None), None);
}

#[test]
fn test_range_algebra_pipeline() {
    let ty = RangeType::new(IntSubtype);
    let codec = FromStrCodec::<i64>::new();

    let a = ty.parse("[1,10)", &codec).unwrap();
    let b = ty.parse("[5,20)", &codec).unwrap();
    assert!(ty.overlaps(&a, &b));
    assert!(!ty.contains_range(&a, &b));

    let both = ty.intersect(&a, &b);
    assert_eq!(ty.to_text(&both, &codec).unwrap(), "[5,10)");
    assert!(ty.contains_range(&a, &both));
    assert!(ty.contains_range(&b, &both));

    let c = ty.parse("[30,40)", &codec).unwrap();
    assert!(ty.strictly_left_of(&a, &c));
    assert!(ty.strictly_right_of(&c, &a));
    assert!(ty.intersect(&a, &c).is_empty());
}

#[test]
fn test_value_types_serialize_with_serde() {
    let codec = FromStrCodec::<i64>::new();
    let array = parse_array("[0:1]={1,NULL}", &codec).unwrap();
    let json = serde_json::to_string(&array).unwrap();
    let back: Array<i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, array);

    let row = parse_composite("(a,,c)").unwrap();
    let json = serde_json::to_string(&row).unwrap();
    let back: Composite = serde_json::from_str(&json).unwrap();
    assert_eq!(back, row);
}

#[test]
fn test_depth_guard_rejects_adversarial_nesting() {
    let depth = 64;
    let text = format!("{}{}{}", "{".repeat(depth), 1, "}".repeat(depth));
    let err = parse_array_with(&text, &TextCodec, &ArrayOptions::new()).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum"));
}
