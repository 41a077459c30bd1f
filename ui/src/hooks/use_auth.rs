use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;

/// The current session as seen by request code.
#[derive(Clone, PartialEq)]
pub struct AuthSession {
    pub token: Option<String>,
    pub login: Callback<String>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_auth() -> AuthSession {
    let (state, dispatch) = use_store::<State>();

    let login = dispatch.reduce_mut_callback_with(|state, token: String| {
        state.login(&token);
    });
    let logout = dispatch.reduce_mut_callback(|state| state.logout());

    AuthSession {
        token: state.token().map(str::to_string),
        login,
        logout,
    }
}
