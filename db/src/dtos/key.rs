pub struct KeyCreateRecord {
    pub owner_email: String,
    pub name: String,
    pub secret: String,
    pub masked_secret: String,
    pub rate_limit: i32,
}
