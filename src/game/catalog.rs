use serde::{Deserialize, Serialize};

/// A named playlist offered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub name: String,
}

pub fn lookup<'a>(catalog: &'a [PlaylistEntry], playlist_id: &str) -> Option<&'a PlaylistEntry> {
    catalog.iter().find(|p| p.id == playlist_id)
}

/// Name shown for a started game: the caller's own label wins, then the
/// catalog entry, then a generated one.
pub fn display_name(catalog: &[PlaylistEntry], playlist_id: &str, supplied: Option<&str>) -> String {
    if let Some(name) = supplied.map(str::trim).filter(|s| !s.is_empty()) {
        return name.to_string();
    }
    match lookup(catalog, playlist_id) {
        Some(entry) => entry.name.clone(),
        None => format!("Playlist {playlist_id}"),
    }
}

/// Insert or rename an entry. Returns true when a new entry was added.
pub fn upsert(catalog: &mut Vec<PlaylistEntry>, playlist_id: &str, name: &str) -> bool {
    if let Some(entry) = catalog.iter_mut().find(|p| p.id == playlist_id) {
        entry.name = name.to_string();
        return false;
    }
    catalog.push(PlaylistEntry {
        id: playlist_id.to_string(),
        name: name.to_string(),
    });
    true
}

/// Returns true when an entry was removed.
pub fn remove(catalog: &mut Vec<PlaylistEntry>, playlist_id: &str) -> bool {
    let before = catalog.len();
    catalog.retain(|p| p.id != playlist_id);
    catalog.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<PlaylistEntry> {
        vec![PlaylistEntry {
            id: "14089683421".into(),
            name: "Rock Internacional".into(),
        }]
    }

    #[test]
    fn test_display_name_priority() {
        let c = catalog();
        assert_eq!(display_name(&c, "14089683421", Some("My Rock")), "My Rock");
        assert_eq!(display_name(&c, "14089683421", None), "Rock Internacional");
        assert_eq!(display_name(&c, "14089683421", Some("  ")), "Rock Internacional");
        assert_eq!(display_name(&c, "555", None), "Playlist 555");
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut c = catalog();
        assert!(upsert(&mut c, "1", "New"));
        assert!(!upsert(&mut c, "1", "Renamed"));
        assert_eq!(lookup(&c, "1").map(|p| p.name.as_str()), Some("Renamed"));
        assert_eq!(c.len(), 2);

        assert!(remove(&mut c, "1"));
        assert!(!remove(&mut c, "1"));
        assert_eq!(c, catalog());
    }
}
