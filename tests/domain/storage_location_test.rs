use docrag::domain::StorageLocation;

#[test]
fn given_location_when_building_object_path_then_joins_bucket_and_key() {
    let location = StorageLocation::new("uploads", "reports/q1.pdf");

    assert_eq!(location.object_path(), "uploads/reports/q1.pdf");
    assert_eq!(location.to_string(), "uploads/reports/q1.pdf");
}

#[test]
fn given_key_with_leading_slash_when_building_object_path_then_slash_is_dropped() {
    let location = StorageLocation::new("uploads", "/q1.pdf");

    assert_eq!(location.object_path(), "uploads/q1.pdf");
}
