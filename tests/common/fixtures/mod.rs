use chrono::{DateTime, TimeZone, Utc};
use makimono::{PostDocument, PostDraft};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
}

pub fn timestamp(offset_minutes: i64) -> DateTime<Utc> {
    base_time() + chrono::Duration::minutes(offset_minutes)
}

pub fn document(id: &str, title: &str, offset_minutes: i64) -> PostDocument {
    PostDocument {
        id: id.to_string(),
        title: Some(title.to_string()),
        description: Some(format!("body of {id}")),
        created_at: timestamp(offset_minutes),
    }
}

pub fn seeded_documents(count: usize) -> Vec<PostDocument> {
    (0..count)
        .map(|i| document(&format!("post-{i:02}"), &format!("Post {i:02}"), i as i64))
        .collect()
}

pub fn draft(title: &str, offset_minutes: i64) -> PostDraft {
    PostDraft::new(
        title.to_string(),
        format!("body of {title}"),
        timestamp(offset_minutes),
    )
}
