use crate::application::ports::store::PostDocument;
use crate::domain::entities::Post;

/// ドキュメントをエンティティへ写像する。
/// titleかdescriptionを欠くドキュメントは不正とみなしてNoneを返す。
pub(crate) fn post_from_document(document: PostDocument) -> Option<Post> {
    let title = document.title.filter(|value| !value.is_empty())?;
    let description = document.description.filter(|value| !value.is_empty())?;
    Some(Post::new_with_id(
        document.id,
        title,
        description,
        document.created_at,
    ))
}

/// 1ページ分をまとめて写像する。不正ドキュメントは黙って除外する。
pub(crate) fn map_documents(documents: Vec<PostDocument>) -> Vec<Post> {
    documents.into_iter().filter_map(post_from_document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document(id: &str, title: Option<&str>, description: Option<&str>) -> PostDocument {
        PostDocument {
            id: id.to_string(),
            title: title.map(|value| value.to_string()),
            description: description.map(|value| value.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn maps_complete_document() {
        let post = post_from_document(document("1", Some("Title"), Some("Body"))).unwrap();
        assert_eq!(post.id, "1");
        assert_eq!(post.title, "Title");
        assert_eq!(post.description, "Body");
    }

    #[test]
    fn drops_documents_missing_fields() {
        assert!(post_from_document(document("1", None, Some("Body"))).is_none());
        assert!(post_from_document(document("2", Some("Title"), None)).is_none());
        assert!(post_from_document(document("3", Some(""), Some("Body"))).is_none());
    }

    #[test]
    fn map_documents_keeps_order_of_survivors() {
        let posts = map_documents(vec![
            document("1", Some("A"), Some("a")),
            document("2", None, Some("b")),
            document("3", Some("C"), Some("c")),
        ]);
        let ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
