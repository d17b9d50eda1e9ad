use serde::Serialize;

///
/// Number of rows counted or affected by an operation
///
#[derive(Debug, Serialize)]
pub struct Count {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct Inserted {
    pub inserted: usize,
}
