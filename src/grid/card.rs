use serde::Serialize;
use url::Url;

use crate::models::attendee::Attendee;

/// Shown when an attendee has no photo; the browser also swaps it in when
/// the real image fails to load.
pub const PLACEHOLDER_PHOTO: &str = "/img/placeholder.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    LinkedIn,
    GitHub,
    Twitter,
    Instagram,
    Facebook,
    Medium,
    Generic,
}

impl SocialIcon {
    /// Stable name for the front end's icon classes.
    pub fn name(&self) -> &'static str {
        match self {
            SocialIcon::LinkedIn => "linkedin",
            SocialIcon::GitHub => "github",
            SocialIcon::Twitter => "twitter",
            SocialIcon::Instagram => "instagram",
            SocialIcon::Facebook => "facebook",
            SocialIcon::Medium => "medium",
            SocialIcon::Generic => "link",
        }
    }
}

fn host_of(link: &str) -> Option<String> {
    // Attendees paste links without a scheme often enough that a bare
    // "github.com/user" must still classify.
    let parsed = Url::parse(link)
        .or_else(|_| Url::parse(&format!("https://{}", link)))
        .ok()?;
    parsed.host_str().map(|host| host.to_ascii_lowercase())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Maps a link to its icon by registrable host; anything unrecognized
/// gets the generic link icon.
pub fn classify_link(link: &str) -> SocialIcon {
    let Some(host) = host_of(link) else {
        return SocialIcon::Generic;
    };

    if host_matches(&host, "linkedin.com") {
        SocialIcon::LinkedIn
    } else if host_matches(&host, "github.com") {
        SocialIcon::GitHub
    } else if host_matches(&host, "twitter.com") || host_matches(&host, "x.com") {
        SocialIcon::Twitter
    } else if host_matches(&host, "instagram.com") {
        SocialIcon::Instagram
    } else if host_matches(&host, "facebook.com") {
        SocialIcon::Facebook
    } else if host_matches(&host, "medium.com") {
        SocialIcon::Medium
    } else {
        SocialIcon::Generic
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLink {
    pub icon: SocialIcon,
    pub url: String,
}

/// View model for one attendee card: exactly what the grid shows, with
/// absent optionals dropped and the photo fallback applied.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub name: String,
    pub company: Option<String>,
    pub byline: String,
    pub description: Option<String>,
    pub photo: String,
    pub links: Vec<SocialLink>,
}

impl Card {
    pub fn from_attendee(attendee: &Attendee) -> Self {
        let byline = match attendee.year_graduated {
            Some(year) => format!("{}, Class of {}", attendee.department, year),
            None => attendee.department.clone(),
        };

        let links = attendee
            .linkedin
            .iter()
            .chain(attendee.social_links.iter())
            .map(|url| SocialLink {
                icon: classify_link(url),
                url: url.clone(),
            })
            .collect();

        Card {
            name: attendee.full_name.clone(),
            company: attendee.company.clone(),
            byline,
            description: attendee.description.clone(),
            photo: attendee
                .photo
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string()),
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee() -> Attendee {
        Attendee {
            id: 1,
            full_name: "Jane Doe".to_string(),
            company: None,
            department: "Physics".to_string(),
            linkedin: None,
            social_links: Vec::new(),
            year_graduated: None,
            description: None,
            photo: None,
        }
    }

    #[test]
    fn recognized_hosts_classify() {
        let cases = [
            ("https://www.linkedin.com/in/jane", SocialIcon::LinkedIn),
            ("https://github.com/jane", SocialIcon::GitHub),
            ("https://twitter.com/jane", SocialIcon::Twitter),
            ("https://x.com/jane", SocialIcon::Twitter),
            ("https://instagram.com/jane", SocialIcon::Instagram),
            ("https://facebook.com/jane", SocialIcon::Facebook),
            ("https://medium.com/@jane", SocialIcon::Medium),
            ("https://janedoe.dev", SocialIcon::Generic),
            ("github.com/jane", SocialIcon::GitHub),
        ];
        for (link, expected) in cases {
            assert_eq!(classify_link(link), expected, "link: {link}");
        }
    }

    #[test]
    fn lookalike_hosts_stay_generic() {
        assert_eq!(classify_link("https://notgithub.com/jane"), SocialIcon::Generic);
        assert_eq!(classify_link("https://github.com.evil.io/x"), SocialIcon::Generic);
    }

    #[test]
    fn byline_includes_year_only_when_present() {
        let mut a = attendee();
        assert_eq!(Card::from_attendee(&a).byline, "Physics");

        a.year_graduated = Some(2021);
        assert_eq!(Card::from_attendee(&a).byline, "Physics, Class of 2021");
    }

    #[test]
    fn missing_photo_falls_back_to_the_placeholder() {
        let mut a = attendee();
        assert_eq!(Card::from_attendee(&a).photo, PLACEHOLDER_PHOTO);

        a.photo = Some("https://example.com/jane.jpg".to_string());
        assert_eq!(Card::from_attendee(&a).photo, "https://example.com/jane.jpg");
    }

    #[test]
    fn linkedin_field_joins_the_social_links() {
        let mut a = attendee();
        a.linkedin = Some("https://linkedin.com/in/jane".to_string());
        a.social_links = vec![
            "https://github.com/jane".to_string(),
            "https://janedoe.dev".to_string(),
        ];

        let card = Card::from_attendee(&a);
        let icons: Vec<SocialIcon> = card.links.iter().map(|l| l.icon).collect();
        assert_eq!(
            icons,
            vec![SocialIcon::LinkedIn, SocialIcon::GitHub, SocialIcon::Generic]
        );
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let card = Card::from_attendee(&attendee());
        assert!(card.company.is_none());
        assert!(card.description.is_none());
        assert!(card.links.is_empty());
    }
}
