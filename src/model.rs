use std::fmt;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// One entry of the remote playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteItem {
    pub id: String,
    pub title: String,
}

impl RemoteItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    pub fn to_fetch_target(&self) -> FetchTarget {
        FetchTarget {
            id: self.id.clone(),
            title: self.title.clone(),
            url: format!("{}{}", WATCH_URL, self.id),
        }
    }
}

/// A remote item resolved to something the fetch tool can retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_target_url() {
        let target = RemoteItem::new("dQw4w9WgXcQ", "Never Gonna").to_fetch_target();
        assert_eq!(target.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(target.title, "Never Gonna");
        assert_eq!(target.to_string(), "Never Gonna (dQw4w9WgXcQ)");
    }
}
