use chrono::{DateTime, Datelike};
use http::Uri;
use serde::Serialize;
use thiserror::Error;

/// A file served from the site root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub href: &'static str,
    /// Suggested name when the browser saves the file.
    pub file_name: &'static str,
}

impl Asset {
    /// Path relative to the assets directory.
    pub fn path(&self) -> &'static str {
        self.href.trim_start_matches('/')
    }
}

/// Stroke glyphs drawn on a 24x24 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    GitHub,
    LinkedIn,
    Instagram,
    XTwitter,
    Download,
}

impl Icon {
    pub const ALL: [Icon; 5] = [
        Icon::GitHub,
        Icon::LinkedIn,
        Icon::Instagram,
        Icon::XTwitter,
        Icon::Download,
    ];

    pub const VIEW_BOX: &'static str = "0 0 24 24";

    /// SVG path data, meant to be stroked with `currentColor`.
    pub fn path(self) -> &'static str {
        match self {
            Icon::GitHub => "M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22",
            Icon::LinkedIn => "M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6zM2 9h4v12H2zM4 2a2 2 0 1 0 0 4 2 2 0 1 0 0-4z",
            Icon::Instagram => "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5zM16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37zM17.5 6.5h.01",
            Icon::XTwitter => "M4 4l11.7 16H20L8.3 4zM20 4l-6.6 7.2M4 20l6.6-7.2",
            Icon::Download => "M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4M7 10l5 5 5-5M12 15V3",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("{label}: malformed url {url}")]
    Malformed { label: String, url: String },
    #[error("{label}: {url} is not an absolute http(s) url")]
    NotAbsolute { label: String, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub icon: Icon,
    pub url: &'static str,
    /// Passed through as the anchor's `aria-label`.
    pub label: &'static str,
}

impl SocialLink {
    pub fn validate(&self) -> Result<Uri, LinkError> {
        let uri = self
            .url
            .parse::<Uri>()
            .map_err(|_| LinkError::Malformed {
                label: self.label.to_string(),
                url: self.url.to_string(),
            })?;
        let web_scheme = matches!(uri.scheme_str(), Some("https") | Some("http"));
        if !web_scheme || uri.authority().is_none() {
            return Err(LinkError::NotAbsolute {
                label: self.label.to_string(),
                url: self.url.to_string(),
            });
        }
        Ok(uri)
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub name: &'static str,
    pub greeting: &'static str,
    pub bio: &'static str,
    pub skills: &'static [&'static str],
    pub links: &'static [SocialLink],
    pub avatar: Asset,
    /// Shown when the avatar fails to load.
    pub avatar_fallback: Asset,
    pub resume: Asset,
}

impl Profile {
    /// Every link that fails validation.
    pub fn invalid_links(&self) -> Vec<LinkError> {
        self.links
            .iter()
            .filter_map(|l| l.validate().err())
            .collect()
    }

    pub fn person(&self) -> Person {
        Person {
            context: "https://schema.org",
            kind: "Person",
            name: self.name,
            description: self.bio,
            image: self.avatar.href,
            knows_about: self.skills,
            same_as: self.links.iter().map(|l| l.url).collect(),
        }
    }

    /// The `Person` document for the page head, as JSON-LD text.
    pub fn person_json_ld(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.person())
    }
}

/// schema.org `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub knows_about: &'static [&'static str],
    pub same_as: Vec<&'static str>,
}

pub static PROFILE: Profile = Profile {
    name: "Siyon Rai",
    greeting: "Hi, I'm Siyon",
    bio: "Passionate about learning and exploring the web development and cybersecurity domain.",
    skills: &[
        "HTML/CSS",
        "JavaScript",
        "React",
        "Tailwindcss",
        "Git/Github",
        "Python",
    ],
    links: &[
        SocialLink {
            icon: Icon::GitHub,
            url: "https://github.com/siyon000",
            label: "GitHub",
        },
        SocialLink {
            icon: Icon::LinkedIn,
            url: "https://www.linkedin.com/in/siyon-rai-076919350/",
            label: "LinkedIn",
        },
        SocialLink {
            icon: Icon::Instagram,
            url: "https://www.instagram.com/siyon_rai/",
            label: "Instagram",
        },
        SocialLink {
            icon: Icon::XTwitter,
            url: "https://x.com/siyon77?t=jCuuSlZcw0UEcHjddZORHQ&s=09",
            label: "X/Twitter",
        },
    ],
    avatar: Asset {
        href: "/profile.jpg",
        file_name: "profile.jpg",
    },
    avatar_fallback: Asset {
        href: "/avatar-placeholder.svg",
        file_name: "avatar-placeholder.svg",
    },
    resume: Asset {
        href: "/SiyonResume.pdf",
        file_name: "SiyonResume.pdf",
    },
};

/// Year the site was built, from the timestamp `build.rs` stamps in.
pub fn build_year() -> Option<i32> {
    parse_year(env!("BUILD_TIME"))
}

fn parse_year(rfc3339: &str) -> Option<i32> {
    DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_links_are_valid() {
        assert_eq!(PROFILE.links.len(), 4);
        assert!(PROFILE.invalid_links().is_empty());
        let labels: Vec<&str> = PROFILE.links.iter().map(|l| l.label).collect();
        assert_eq!(labels, ["GitHub", "LinkedIn", "Instagram", "X/Twitter"]);
    }

    #[test]
    fn test_link_validation() {
        let relative = SocialLink {
            icon: Icon::GitHub,
            url: "/just/a/path",
            label: "Relative",
        };
        assert!(matches!(
            relative.validate(),
            Err(LinkError::NotAbsolute { .. })
        ));

        let ftp = SocialLink {
            icon: Icon::GitHub,
            url: "ftp://example.com/file",
            label: "Ftp",
        };
        assert!(matches!(ftp.validate(), Err(LinkError::NotAbsolute { .. })));

        let broken = SocialLink {
            icon: Icon::GitHub,
            url: "https://exa mple.com",
            label: "Broken",
        };
        assert_eq!(
            broken.validate(),
            Err(LinkError::Malformed {
                label: "Broken".to_string(),
                url: "https://exa mple.com".to_string()
            })
        );
    }

    #[test]
    fn test_resume_download_name() {
        assert_eq!(PROFILE.resume.file_name, "SiyonResume.pdf");
        assert_eq!(PROFILE.resume.path(), "SiyonResume.pdf");
    }

    #[test]
    fn test_person_json_ld() {
        let text = PROFILE.person_json_ld().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["@context"], "https://schema.org");
        assert_eq!(doc["@type"], "Person");
        assert_eq!(doc["name"], PROFILE.name);
        assert_eq!(doc["sameAs"].as_array().map(Vec::len), Some(4));
        assert_eq!(doc["knowsAbout"][2], "React");
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        let path_chars = "MmLlHhVvCcSsQqTtAaZz0123456789.,- ";
        for icon in Icon::ALL {
            let d = icon.path();
            assert!(d.starts_with('M'), "{icon:?}");
            assert!(d.chars().all(|c| path_chars.contains(c)), "{icon:?}: {d}");
        }
        for link in PROFILE.links {
            assert!(!link.icon.path().is_empty(), "{}", link.label);
        }
    }

    #[test]
    fn test_build_year() {
        assert_eq!(parse_year("2024-05-01T12:00:00+00:00"), Some(2024));
        assert_eq!(parse_year("yesterday"), None);
        assert!(build_year().is_some());
    }
}
