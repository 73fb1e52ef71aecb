use std::cell::RefCell;
use std::rc::Rc;

use prax_state_core::{CursorStore, CursorVariant, NavigationStore, PreloaderStore, StoreError};

#[test]
fn stores_are_independent() {
    let cursor = CursorStore::new();
    let nav = NavigationStore::new();
    let pre = PreloaderStore::new();

    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let (a, b, c) = (log.clone(), log.clone(), log.clone());
    let _s1 = cursor.subscribe(move |_| a.borrow_mut().push("cursor"));
    let _s2 = nav.subscribe(move |_| b.borrow_mut().push("nav"));
    let _s3 = pre.subscribe(move |_| c.borrow_mut().push("preloader"));

    nav.set_menu_open(true);
    cursor.set_variant(CursorVariant::Hidden);
    assert_eq!(*log.borrow(), vec!["nav", "cursor"]);
}

#[test]
fn handles_share_state() {
    let nav = NavigationStore::new();
    let header = nav.clone();
    let writer = header.claim_header_writer().unwrap();
    writer.set_visible(false);
    assert!(!nav.snapshot().is_header_visible);
    assert_eq!(
        nav.claim_header_writer().map(|_| ()),
        Err(StoreError::WriterClaimed("header".to_string()))
    );
}

#[test]
fn dropped_subscription_stops_notifications() {
    let cursor = CursorStore::new();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    let sub = cursor.subscribe(move |_| *h.borrow_mut() += 1);
    cursor.set_text("Drag");
    drop(sub);
    cursor.set_text("View");
    assert_eq!(*hits.borrow(), 1);
}
