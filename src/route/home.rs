use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::{
    core::{client_route, i18n::Translator, security::BearerAuthorization},
    model::enums::Language,
    schema::{
        common::{ApiError, RedirectResponse},
        home::{
            DashboardResponse, DashboardResponses, LinkItem, PageResponse, PageResponses,
            ShellResponse, ShellResponses,
        },
    },
    AppState,
};

use super::{begin, caller, commit};

const MODULE: &str = "route.home";

/// Contact kinds linked from the sidebar, with their title keys.
const CONTACTS: [(&str, &str); 4] = [
    ("supplier", "contactSupplier"),
    ("medical-owner", "contactMedicalOwner"),
    ("medical-rep", "contactMedicalRep"),
    ("order-booker", "contactOrderBooker"),
];

#[derive(Tags)]
enum ApiHomeTags {
    Home,
    Pages,
}

pub struct ApiHome;

fn link(tr: &Translator, key: &str, href: &str) -> LinkItem {
    LinkItem {
        label: tr.t(key),
        href: href.to_string(),
    }
}

fn page(tr: &Translator, title_key: &str, body_key: &str) -> PageResponses {
    PageResponses::Ok(Json(PageResponse {
        title: tr.t(title_key),
        body: tr.t(body_key),
        language: tr.language(),
    }))
}

/// Navbar and sidebar content of every screen.
pub fn shell(tr: &Translator) -> ShellResponse {
    let menu = vec![
        link(tr, "home", client_route::HOME),
        link(tr, "aboutUs", client_route::ABOUT),
        link(tr, "communityPage", client_route::COMMUNITY),
        link(tr, "complaintPage", client_route::COMPLAINTS),
    ];
    let quick_contacts = CONTACTS
        .iter()
        .map(|(kind, key)| link(tr, key, &client_route::contact(kind)))
        .collect();
    ShellResponse {
        title: tr.t("portalTitle"),
        subtitle: tr.t("portalSubtitle"),
        search_placeholder: tr.t("searchPlaceholder"),
        menu,
        quick_contacts_title: tr.t("quickContacts"),
        quick_contacts,
        language: tr.language(),
    }
}

#[OpenApi]
impl ApiHome {
    #[oai(path = "/shell", method = "get", tag = "ApiHomeTags::Home")]
    async fn home_shell(&self, lang: Query<Option<Language>>) -> ShellResponses {
        let tr = Translator::resolve(None, lang.0);
        ShellResponses::Ok(Json(shell(&tr)))
    }

    /// Landing screen of onboarded accounts
    #[oai(path = "/dashboard", method = "get", tag = "ApiHomeTags::Home")]
    async fn home_dashboard(
        &self,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> DashboardResponses {
        dashboard(&state, auth.0.token, lang.0, "home_dashboard")
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(path = "/home", method = "get", tag = "ApiHomeTags::Home")]
    async fn home_home(
        &self,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> DashboardResponses {
        dashboard(&state, auth.0.token, lang.0, "home_home")
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(path = "/pages/about", method = "get", tag = "ApiHomeTags::Pages")]
    async fn pages_about(&self, lang: Query<Option<Language>>) -> PageResponses {
        page(&Translator::resolve(None, lang.0), "aboutUs", "aboutBody")
    }

    #[oai(path = "/pages/community", method = "get", tag = "ApiHomeTags::Pages")]
    async fn pages_community(&self, lang: Query<Option<Language>>) -> PageResponses {
        page(
            &Translator::resolve(None, lang.0),
            "communityPage",
            "communityBody",
        )
    }

    #[oai(path = "/pages/complaints", method = "get", tag = "ApiHomeTags::Pages")]
    async fn pages_complaints(&self, lang: Query<Option<Language>>) -> PageResponses {
        page(
            &Translator::resolve(None, lang.0),
            "complaintPage",
            "complaintsBody",
        )
    }

    #[oai(path = "/pages/contact/:kind", method = "get", tag = "ApiHomeTags::Pages")]
    async fn pages_contact(
        &self,
        kind: Path<String>,
        lang: Query<Option<Language>>,
    ) -> PageResponses {
        let title_key = CONTACTS
            .iter()
            .find(|(x, _)| *x == kind.0)
            .map(|(_, key)| *key)
            .unwrap_or("contact");
        page(&Translator::resolve(None, lang.0), title_key, "contactBody")
    }
}

async fn dashboard(
    state: &AppState,
    token: Option<String>,
    lang: Option<Language>,
    function: &str,
) -> Result<DashboardResponses, ApiError> {
    let mut tx = begin(state, MODULE, function).await?;
    let caller = caller(state, &mut tx, token, lang, MODULE, function).await?;
    commit(tx, MODULE, function).await?;

    let current = caller.progress.state;
    if !current.is_onboarded() {
        let redirect_to = current.route().to_string();
        return Ok(DashboardResponses::SeeOther(
            Json(RedirectResponse {
                redirect_to: redirect_to.clone(),
            }),
            redirect_to,
        ));
    }
    let tr = caller.tr;
    let profile = caller.progress.profile;
    let account_type = profile.account_type();
    Ok(DashboardResponses::Ok(Json(DashboardResponse {
        greeting: format!("{}, {}", tr.t("welcome"), profile.display_name()),
        message: tr.t("dashboardReady"),
        account_type,
        account_type_label: account_type.map(|x| tr.t(x.label_key())),
        language: tr.language(),
        email: profile.email,
        username: profile.username,
    })))
}
