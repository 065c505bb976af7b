use anyhow::{bail, Result};

use crate::domain::{BuildRequest, UseCase};

use super::super::Container;

pub struct RecommendController<'a> {
    container: &'a Container,
}

impl<'a> RecommendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn recommend(
        &self,
        budget: u32,
        use_case: String,
        preferences: Vec<String>,
    ) -> Result<String> {
        if budget == 0 {
            bail!("Budget must be greater than zero");
        }
        if use_case.trim().is_empty() {
            bail!("Use case must not be empty");
        }

        let request =
            BuildRequest::new(budget, UseCase::parse(&use_case)).with_preferences(preferences);
        let result = self.container.chat_use_case().build(&request).await?;

        if result.is_empty() {
            bail!("The model reply contained no components. Try again or use --structured-output.");
        }

        Ok(self.container.renderer().render(&result))
    }
}
