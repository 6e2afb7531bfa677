//! Testrun group membership.

use reqwest::Method;

use crate::api::ApiPart;
use crate::client::RequestBody;
use crate::error::{Result, SlickError};
use crate::model::Model;
use crate::models::{Testrun, TestrunGroup};

impl ApiPart<TestrunGroup> {
    /// Add `testrun` to the pending group and return the updated group.
    ///
    /// ```no_run
    /// # async fn demo(slick: slickqa::SlickConnection, group: slickqa::models::TestrunGroup, run: slickqa::models::Testrun) -> slickqa::Result<()> {
    /// let group = slick.testrungroups().with(&group).add_testrun(&run).await?;
    /// assert!(group.contains(run.id.as_deref().unwrap_or_default()));
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip_all, fields(testrun = ?testrun.id))]
    pub async fn add_testrun(&mut self, testrun: &Testrun) -> Result<TestrunGroup> {
        let url = self.membership_url("addtestrun", testrun)?;
        self.fetch(Method::POST, &url, RequestBody::Empty).await
    }

    /// Remove `testrun` from the pending group and return the updated group.
    #[tracing::instrument(skip_all, fields(testrun = ?testrun.id))]
    pub async fn remove_testrun(&mut self, testrun: &Testrun) -> Result<TestrunGroup> {
        let url = self.membership_url("removetestrun", testrun)?;
        self.fetch(Method::DELETE, &url, RequestBody::Empty).await
    }

    fn membership_url(&mut self, action: &str, testrun: &Testrun) -> Result<String> {
        if !self.has_pending() {
            return Err(SlickError::MissingId(TestrunGroup::NAME));
        }
        let testrun_id = testrun.id().ok_or(SlickError::MissingId(Testrun::NAME))?;
        Ok(format!("{}/{action}/{testrun_id}", self.url()))
    }
}
