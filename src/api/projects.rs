//! Project lookups and the nested release/build/component parts.

use crate::api::ApiPart;
use crate::error::Result;
use crate::models::{Build, Component, Project, Release, SlickUpdate, UpdateRecord};

impl ApiPart<Project> {
    /// Fetch a project by its name.
    ///
    /// The name is percent-encoded into the `byname/` path, so spaces
    /// and slashes are safe.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_name(&mut self, name: &str) -> Result<Project> {
        self.set_pending(format!("byname/{}", urlencoding::encode(name)));
        self.get().await
    }

    /// Releases of the pending project.
    pub fn releases(self) -> ApiPart<Release> {
        self.child()
    }

    /// Components of the pending project.
    pub fn components(self) -> ApiPart<Component> {
        self.child()
    }
}

impl ApiPart<Release> {
    /// Builds of the pending release.
    pub fn builds(self) -> ApiPart<Build> {
        self.child()
    }
}

impl ApiPart<SlickUpdate> {
    /// Records of the pending update.
    pub fn records(self) -> ApiPart<UpdateRecord> {
        self.child()
    }
}
