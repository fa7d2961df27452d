pub struct ClosetFields;

impl ClosetFields {
    pub const IMAGE: &'static str = "image";
    pub const CATEGORY: &'static str = "category";
    pub const SUB_TYPE: &'static str = "sub_type";
    pub const PANTS_TYPE: &'static str = "pants_type";
    pub const ATTRIBUTE_TAGS: &'static str = "attribute_tags";
    pub const COLORS: &'static str = "colors";
    pub const TOP_URL: &'static str = "top_url";
    pub const BOTTOM_URL: &'static str = "bottom_url";
    pub const FULL_NAME: &'static str = "full_name";
    pub const EMAIL: &'static str = "email";
    pub const PASSWORD: &'static str = "password";
    pub const USERNAME: &'static str = "username";
}
