use super::*;

#[test]
fn frame_requests_are_counted_and_consumed_once() {
    let mut host = HeadlessHost::new();
    assert!(!host.take_frame_request());

    host.request_frame();
    host.request_frame();
    assert_eq!(host.frame_requests(), 2);
    assert!(host.take_frame_request());
    assert!(!host.take_frame_request());
}

#[test]
fn cursor_changes_are_recorded_in_order() {
    let mut host = HeadlessHost::new();
    assert_eq!(host.cursor(), &Cursor::Default);

    host.set_cursor(&Cursor::Pointer);
    host.set_cursor(&Cursor::Default);
    assert_eq!(host.cursor(), &Cursor::Default);
    assert_eq!(host.cursor_changes(), &[Cursor::Pointer, Cursor::Default]);
}
