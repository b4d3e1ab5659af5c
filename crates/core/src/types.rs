/// Profile ids are MongoDB ObjectId hex strings (kiosk-mode ids are
/// synthesized and opaque to callers).
pub type DbId = String;
