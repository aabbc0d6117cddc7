/// Site-wide settings service
use crate::application::repositories::SiteSettingsRepository;
use crate::application::services::errors::{EditError, EditResult};
use crate::application::services::page_editing_service::EventCallback;
use crate::domain::events::{CmsEvent, SiteNameChanged};
use crate::domain::value_objects::{Actor, SiteName};
use crate::domain::ValidationError;
use tracing::{info, warn};

pub struct SiteService<S: SiteSettingsRepository> {
    repository: S,
    event_callback: Option<EventCallback>,
}

impl<S: SiteSettingsRepository> SiteService<S> {
    pub fn new(repository: S) -> Self {
        SiteService {
            repository,
            event_callback: None,
        }
    }

    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    pub fn get_site_name(&self) -> EditResult<SiteName> {
        Ok(self.repository.get_site_name()?)
    }

    /// Rename the site. Admin only.
    pub fn set_site_name(&mut self, actor: Option<&Actor>, name: &str) -> EditResult<SiteName> {
        let actor = actor
            .ok_or_else(|| EditError::Unauthorized("log in to rename the site".to_string()))?;
        if !actor.is_admin() {
            warn!("{} tried to rename the site without admin rights", actor.name());
            return Err(EditError::Unauthorized(
                "only admins can rename the site".to_string(),
            ));
        }

        let name = SiteName::new(name)
            .map_err(|e| ValidationError::InvalidSiteName(e.to_string()))?;
        self.repository.set_site_name(&name)?;

        info!("Site renamed to {:?} by {}", name.as_str(), actor.name());
        if let Some(ref callback) = self.event_callback {
            callback(CmsEvent::SiteNameChanged(SiteNameChanged { name: name.clone() }));
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repositories::{RepositoryError, RepositoryResult};
    use crate::domain::value_objects::Role;

    #[derive(Default)]
    struct InMemorySiteSettings {
        name: Option<SiteName>,
    }

    impl SiteSettingsRepository for InMemorySiteSettings {
        fn get_site_name(&self) -> RepositoryResult<SiteName> {
            self.name
                .clone()
                .ok_or_else(|| RepositoryError::NotFound("site name".to_string()))
        }

        fn set_site_name(&mut self, name: &SiteName) -> RepositoryResult<()> {
            self.name = Some(name.clone());
            Ok(())
        }
    }

    fn admin() -> Actor {
        Actor::new(1, "root", Role::Admin)
    }

    #[test]
    fn test_missing_site_name_is_not_found() {
        let service = SiteService::new(InMemorySiteSettings::default());

        assert!(matches!(service.get_site_name(), Err(EditError::NotFound(_))));
    }

    #[test]
    fn test_admin_renames_site() {
        let mut service = SiteService::new(InMemorySiteSettings::default());

        let name = service.set_site_name(Some(&admin()), "  Small CMS ").unwrap();

        assert_eq!(name.as_str(), "Small CMS");
        assert_eq!(service.get_site_name().unwrap().as_str(), "Small CMS");
    }

    #[test]
    fn test_non_admin_cannot_rename_site() {
        let mut service = SiteService::new(InMemorySiteSettings::default());
        let user = Actor::new(2, "alice", Role::User);

        assert!(matches!(
            service.set_site_name(Some(&user), "Mine now"),
            Err(EditError::Unauthorized(_))
        ));
        assert!(matches!(
            service.set_site_name(None, "Anyone"),
            Err(EditError::Unauthorized(_))
        ));
        assert!(service.get_site_name().is_err());
    }

    #[test]
    fn test_blank_site_name_is_rejected() {
        let mut service = SiteService::new(InMemorySiteSettings::default());

        assert!(matches!(
            service.set_site_name(Some(&admin()), "   "),
            Err(EditError::Validation(ValidationError::InvalidSiteName(_)))
        ));
    }
}
