/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// New random order ID
pub fn order_id() -> String {
    format!("ord-{}", uuid::Uuid::new_v4().simple())
}
