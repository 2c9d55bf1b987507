use serde::{Deserialize, Serialize};

/// A people row joined with its department name, as it comes back from
/// SQLite. `social_links` holds the raw stored JSON.
#[derive(sqlx::FromRow, Debug)]
pub struct AttendeeRow {
    pub id: i64,
    pub full_name: String,
    pub company: Option<String>,
    pub department: String,
    pub linkedin: Option<String>,
    pub social_links: Option<String>,
    pub year_graduated: Option<i64>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}

/// Wire shape of an attendee. `department` carries the department name,
/// resolved to an id on write and joined back on read.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: i64,
    pub full_name: String,
    pub company: Option<String>,
    pub department: String,
    pub linkedin: Option<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    pub year_graduated: Option<i64>,
    pub description: Option<String>,
    pub photo: Option<String>,
}

impl AttendeeRow {
    /// Fails only if the stored social_links column holds JSON that is
    /// not an array of strings.
    pub fn into_attendee(self) -> Result<Attendee, serde_json::Error> {
        let social_links = match self.social_links {
            Some(ref raw) => serde_json::from_str(raw)?,
            None => Vec::new(),
        };

        Ok(Attendee {
            id: self.id,
            full_name: self.full_name,
            company: self.company,
            department: self.department,
            linkedin: self.linkedin,
            social_links,
            year_graduated: self.year_graduated,
            description: self.description,
            photo: self.photo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AttendeeRow {
        AttendeeRow {
            id: 1,
            full_name: "Jane Doe".to_string(),
            company: None,
            department: "Physics".to_string(),
            linkedin: None,
            social_links: None,
            year_graduated: Some(2021),
            description: None,
            photo_url: None,
        }
    }

    #[test]
    fn missing_social_links_reads_as_empty_list() {
        let attendee = row().into_attendee().unwrap();
        assert!(attendee.social_links.is_empty());
    }

    #[test]
    fn stored_social_links_deserialize() {
        let mut r = row();
        r.social_links = Some(r#"["https://github.com/janedoe"]"#.to_string());
        let attendee = r.into_attendee().unwrap();
        assert_eq!(attendee.social_links, vec!["https://github.com/janedoe"]);
    }

    #[test]
    fn malformed_social_links_is_an_error() {
        let mut r = row();
        r.social_links = Some("not json".to_string());
        assert!(r.into_attendee().is_err());
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let mut r = row();
        r.photo_url = Some("https://example.com/jane.jpg".to_string());
        let value = serde_json::to_value(r.into_attendee().unwrap()).unwrap();
        assert_eq!(value["fullName"], "Jane Doe");
        assert_eq!(value["yearGraduated"], 2021);
        assert_eq!(value["photo"], "https://example.com/jane.jpg");
        assert!(value["socialLinks"].is_array());
        assert!(value["company"].is_null());
    }
}
