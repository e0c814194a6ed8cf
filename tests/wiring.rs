//! Session wiring of the public API: configuration into client into store.

use lectern::{
    Conf, CourseChanges, CourseId, HttpCatalogApi, Store, StoreError,
};

#[tokio::test]
async fn store_wires_up_from_default_conf() {
    let conf = Conf::default();
    let api = HttpCatalogApi::new(&conf.api).unwrap();
    let store = Store::new(api);

    // Nothing was fetched yet: the session starts from an empty list.
    assert!(store.current().is_empty());

    // Saving against the empty list is a lookup error, not a panic and not a
    // silent success.
    let err = store
        .save_course(CourseId(1), &CourseChanges::category("ADVANCED"))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownCourse(CourseId(1))));
}
