pub struct RealtimeBridgeConfig {
    ///
    /// Number of newest notifications loaded into the mirror
    ///
    pub snapshot_limit: u32,
}
