pub(crate) mod posts;

pub(crate) use posts::map_documents;
