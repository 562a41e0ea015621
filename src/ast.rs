use crate::options::RawOption;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub wrappers: Vec<Wrapper>,
    pub servers: Vec<Server>,
    pub tables: Vec<Table>,
    pub mappings: Vec<UserMapping>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    pub name: String,
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub name: String,
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub server: String,
    pub columns: Vec<Column>,
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub typ: String,
    /// Declared length, as in `varchar(32)`
    pub length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserMapping {
    pub server: String,
    pub options: Vec<RawOption>,
}
