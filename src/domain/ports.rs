/// Outgoing response headers, as exposed by whatever HTTP layer hosts us.
pub trait ResponseHeaders {
    fn append_header(&mut self, name: &str, value: String);
}

impl ResponseHeaders for Vec<(String, String)> {
    fn append_header(&mut self, name: &str, value: String) {
        self.push((name.to_string(), value));
    }
}
