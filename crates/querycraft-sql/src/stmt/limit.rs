/// Pagination window: skip `offset` rows, take `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: Option<u64>,
}
