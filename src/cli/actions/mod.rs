pub mod session;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;
use crate::syft::Page;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    List(Page),
    View { uid: String },
    Me,
    Search { name: String, page: Page },
    Update(users::UpdateArgs),
    Session { user_id: String },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }

    #[must_use]
    pub fn update(
        name: String,
        email: String,
        password: SecretString,
        institution: String,
        website: String,
    ) -> Self {
        Self::Update(users::UpdateArgs {
            name,
            email,
            password,
            institution,
            website,
        })
    }
}
