pub struct ChangesServiceConfig {
    ///
    /// Number of changes a single user's channel holds
    /// before slow subscribers start lagging
    ///
    pub buffer_size: usize,
}
