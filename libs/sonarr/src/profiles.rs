use crate::{
    error::SonarrError,
    models::{ImportListExclusion, QualityProfile, RootFolder, Tag},
    SonarrClient,
};

impl SonarrClient {
    /// GET /api/v3/rootfolder
    pub async fn root_folders(&self) -> crate::Result<Vec<RootFolder>> {
        self.send(self.get("/rootfolder")).await
    }

    /// GET /api/v3/qualityprofile
    pub async fn quality_profiles(&self) -> crate::Result<Vec<QualityProfile>> {
        self.send(self.get("/qualityprofile")).await
    }

    /// GET /api/v3/languageprofile
    pub async fn language_profiles(&self) -> crate::Result<Vec<QualityProfile>> {
        self.send(self.get("/languageprofile")).await
    }

    /// GET /api/v3/tag
    pub async fn tags(&self) -> crate::Result<Vec<Tag>> {
        self.send(self.get("/tag")).await
    }

    /// POST /api/v3/tag
    pub async fn create_tag(&self, label: &str) -> crate::Result<Tag> {
        let tag = Tag {
            id: 0,
            label: label.to_string(),
        };
        self.send(self.post("/tag").json(&tag)).await
    }

    /// GET /api/v3/importlistexclusion
    pub async fn import_list_exclusions(&self) -> crate::Result<Vec<ImportListExclusion>> {
        self.send(self.get("/importlistexclusion")).await
    }

    pub(crate) async fn resolve_root_folder(&self, path: &str) -> crate::Result<String> {
        let folders = self.root_folders().await?;
        find_root_folder(&folders, path)
            .map(|folder| folder.path.clone())
            .ok_or_else(|| SonarrError::NotFound {
                kind: "Root folder",
                name: path.to_string(),
            })
    }

    pub(crate) async fn resolve_quality_profile(&self, name: &str) -> crate::Result<i64> {
        let profiles = self.quality_profiles().await?;
        find_profile(&profiles, name).ok_or_else(|| SonarrError::NotFound {
            kind: "Quality profile",
            name: name.to_string(),
        })
    }

    pub(crate) async fn resolve_language_profile(&self, name: &str) -> crate::Result<i64> {
        let profiles = self.language_profiles().await?;
        find_profile(&profiles, name).ok_or_else(|| SonarrError::NotFound {
            kind: "Language profile",
            name: name.to_string(),
        })
    }

    /// Map tag labels to ids, creating the ones Sonarr doesn't know yet.
    pub(crate) async fn ensure_tags(&self, labels: &[String]) -> crate::Result<Vec<i64>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let existing = self.tags().await?;
        let mut ids = Vec::with_capacity(labels.len());
        for label in labels {
            let found = existing
                .iter()
                .find(|tag| tag.label.eq_ignore_ascii_case(label));
            let id = match found {
                Some(tag) => tag.id,
                None => {
                    tracing::info!(label = %label, "Creating Sonarr tag");
                    self.create_tag(label).await?.id
                }
            };
            ids.push(id);
        }
        Ok(ids)
    }
}

fn find_root_folder<'a>(folders: &'a [RootFolder], path: &str) -> Option<&'a RootFolder> {
    let wanted = path.trim_end_matches(['/', '\\']);
    folders
        .iter()
        .find(|folder| folder.path.trim_end_matches(['/', '\\']) == wanted)
}

/// Match a profile by name (case-insensitive) or by numeric id.
fn find_profile(profiles: &[QualityProfile], name: &str) -> Option<i64> {
    let by_id = name.parse::<i64>().ok();
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name) || Some(profile.id) == by_id)
        .map(|profile| profile.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> Vec<QualityProfile> {
        vec![
            QualityProfile {
                id: 1,
                name: "Any".into(),
            },
            QualityProfile {
                id: 4,
                name: "HD-1080p".into(),
            },
        ]
    }

    #[test]
    fn test_find_profile_by_name_or_id() {
        assert_eq!(find_profile(&profiles(), "hd-1080p"), Some(4));
        assert_eq!(find_profile(&profiles(), "1"), Some(1));
        assert_eq!(find_profile(&profiles(), "Ultra-HD"), None);
    }

    #[test]
    fn test_find_root_folder_ignores_trailing_slash() {
        let folders = vec![RootFolder {
            id: 1,
            path: "/data/anime/".into(),
        }];
        assert!(find_root_folder(&folders, "/data/anime").is_some());
        assert!(find_root_folder(&folders, "/data/tv").is_none());
    }
}
