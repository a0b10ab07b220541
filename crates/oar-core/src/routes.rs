// ── Route table ──
//
// Maps a URL path to exactly one view. Entries are tried in order and the
// first match wins; a path nothing matches lands on `View::RouteNotFound`.
// Two entries are gated on the `claim_a_facility` flag and fall back to an
// alternative view while it is off.

use std::collections::HashMap;
use std::fmt;

use crate::model::FeatureFlags;

/// Flag gating the claim workflow routes.
pub const CLAIM_A_FACILITY: &str = "claim_a_facility";

/// URL path patterns. `:name` segments capture one path segment.
pub mod paths {
    pub const MAIN: &str = "/";
    pub const AUTH_LOGIN_FORM: &str = "/auth/login";
    pub const AUTH_REGISTER_FORM: &str = "/auth/register";
    pub const AUTH_RESET_PASSWORD_FORM: &str = "/auth/resetpassword/:uid";
    pub const AUTH_CONFIRM_REGISTRATION: &str = "/auth/confirm/:uid";
    pub const PROFILE: &str = "/profile/:id";
    pub const CONTRIBUTE: &str = "/contribute";
    pub const DASHBOARD: &str = "/dashboard";
    pub const FACILITY_LIST_ITEMS: &str = "/lists/:listID";
    pub const LISTS: &str = "/lists";
    pub const FACILITIES: &str = "/facilities";
    pub const ABOUT_PROCESSING: &str = "/about/processing";
    pub const CLAIM_FACILITY: &str = "/facilities/:oarID/claim";
    pub const CLAIMED_FACILITIES: &str = "/claimed";
    pub const CLAIMED_FACILITY_DETAILS: &str = "/claimed/:claimID";
}

/// Every view the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    MapAndSidebar,
    ClaimFacility,
    ClaimedFacilities,
    RegisterForm,
    LoginForm,
    ResetPasswordForm,
    ConfirmRegistration,
    UserProfile,
    Contribute,
    Dashboard,
    FacilityListItems,
    FacilityLists,
    AboutProcessing,
    RouteNotFound,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            Self::MapAndSidebar => "Facilities",
            Self::ClaimFacility => "Claim this facility",
            Self::ClaimedFacilities => "Claimed facilities",
            Self::RegisterForm => "Register",
            Self::LoginForm => "Log in",
            Self::ResetPasswordForm => "Reset password",
            Self::ConfirmRegistration => "Confirm registration",
            Self::UserProfile => "Profile",
            Self::Contribute => "Contribute",
            Self::Dashboard => "Dashboard",
            Self::FacilityListItems => "List items",
            Self::FacilityLists => "My lists",
            Self::AboutProcessing => "About processing",
            Self::RouteNotFound => "Not found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Swap in `alternative` unless `flag` is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub flag: &'static str,
    pub alternative: View,
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    /// Exact routes must consume the whole path; others match any path
    /// that starts with the pattern's segments.
    pub exact: bool,
    pub view: View,
    pub gate: Option<Gate>,
}

const fn route(pattern: &'static str, exact: bool, view: View) -> Route {
    Route {
        pattern,
        exact,
        view,
        gate: None,
    }
}

const fn gated(pattern: &'static str, exact: bool, view: View, alternative: View) -> Route {
    Route {
        pattern,
        exact,
        view,
        gate: Some(Gate {
            flag: CLAIM_A_FACILITY,
            alternative,
        }),
    }
}

/// The route table, in priority order.
pub const ROUTES: &[Route] = &[
    route(paths::MAIN, true, View::MapAndSidebar),
    gated(paths::CLAIM_FACILITY, true, View::ClaimFacility, View::MapAndSidebar),
    gated(paths::CLAIMED_FACILITIES, false, View::ClaimedFacilities, View::RouteNotFound),
    route(paths::FACILITIES, false, View::MapAndSidebar),
    route(paths::AUTH_REGISTER_FORM, false, View::RegisterForm),
    route(paths::AUTH_LOGIN_FORM, false, View::LoginForm),
    route(paths::AUTH_RESET_PASSWORD_FORM, false, View::ResetPasswordForm),
    route(paths::AUTH_CONFIRM_REGISTRATION, false, View::ConfirmRegistration),
    route(paths::PROFILE, false, View::UserProfile),
    route(paths::CONTRIBUTE, false, View::Contribute),
    route(paths::DASHBOARD, false, View::Dashboard),
    route(paths::FACILITY_LIST_ITEMS, false, View::FacilityListItems),
    route(paths::LISTS, false, View::FacilityLists),
    route(paths::ABOUT_PROCESSING, false, View::AboutProcessing),
];

/// Values captured by `:name` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<&'static str, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Outcome of resolving a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The path that was resolved, as given.
    pub path: String,
    pub view: View,
    /// Pattern of the matching entry; `None` for the not-found fallback.
    pub pattern: Option<&'static str>,
    /// Params of the matching entry, kept even when a gate swapped the view.
    pub params: RouteParams,
}

impl Resolved {
    /// Claim id under the claimed-facilities route (`/claimed/:claimID`).
    ///
    /// The claimed-facilities entry matches by prefix, so the id is read
    /// from the path rather than from `params`.
    pub fn claim_id(&self) -> Option<String> {
        if self.view != View::ClaimedFacilities {
            return None;
        }
        let params = match_path(paths::CLAIMED_FACILITY_DETAILS, false, &self.path)?;
        params.get("claimID").map(str::to_owned)
    }
}

impl Route {
    /// Match this entry against `path`.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        match_path(self.pattern, self.exact, path)
    }
}

/// Resolve `path` to a view, consulting `flags` for gated entries.
pub fn resolve(path: &str, flags: &FeatureFlags) -> Resolved {
    for entry in ROUTES {
        let Some(params) = entry.matches(path) else {
            continue;
        };
        let view = match entry.gate {
            Some(gate) if !flags.is_enabled(gate.flag) => gate.alternative,
            _ => entry.view,
        };
        return Resolved {
            path: path.to_owned(),
            view,
            pattern: Some(entry.pattern),
            params,
        };
    }

    Resolved {
        path: path.to_owned(),
        view: View::RouteNotFound,
        pattern: None,
        params: RouteParams::default(),
    }
}

/// Segment-wise match of `path` against `pattern`.
///
/// Query strings and fragments are ignored, as are empty segments (so a
/// trailing slash never matters). Literal segments compare
/// case-insensitively.
fn match_path(pattern: &'static str, exact: bool, path: &str) -> Option<RouteParams> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut actual = path.split('/').filter(|s| !s.is_empty());
    let mut params = HashMap::new();

    for expected in pattern.split('/').filter(|s| !s.is_empty()) {
        let segment = actual.next()?;
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name, segment.to_owned());
            }
            None if expected.eq_ignore_ascii_case(segment) => {}
            None => return None,
        }
    }

    if exact && actual.next().is_some() {
        return None;
    }

    Some(RouteParams(params))
}
