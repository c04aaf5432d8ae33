#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Root,
    Login,
    Signup,
    Chat,
    History,
    Upload,
    Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    PublicOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

impl Route {
    /// Root has no class of its own, it always forwards to login.
    pub fn class(&self) -> Option<RouteClass> {
        match self {
            Route::Root => return None,
            Route::Login | Route::Signup => return Some(RouteClass::PublicOnly),
            Route::Chat | Route::History | Route::Upload | Route::Profile => {
                return Some(RouteClass::Protected)
            }
        }
    }
}
