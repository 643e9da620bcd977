pub(crate) mod mappers;
