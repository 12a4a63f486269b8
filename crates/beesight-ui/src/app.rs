use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::header::Header;
use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::app_form::{AppEditPage, AppRegisterPage};
use crate::pages::app_list::AppListPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::history::AuthHistoryPage;
use crate::pages::license_form::{LicenseEditPage, LicenseRegisterPage};
use crate::pages::license_list::LicenseListPage;
use crate::pages::login::LoginPage;
use crate::pages::project_detail::ProjectDetailPage;
use crate::pages::project_form::{ProjectEditPage, ProjectRegisterPage};
use crate::pages::project_list::ProjectListPage;
use crate::pages::user_form::UserRegisterPage;
use crate::pages::user_list::UserListPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/beesight-console.css" />
        <Title text="Beesight Console" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| {
                    view! {
                        <Layout>
                            <p class="not-found">"Page not found."</p>
                        </Layout>
                    }
                        .into_any()
                }>
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("") view=|| view! { <Layout><DashboardPage /></Layout> } />
                    <Route
                        path=StaticSegment("history")
                        view=|| view! { <Layout><AuthHistoryPage /></Layout> }
                    />

                    <Route
                        path=StaticSegment("projects")
                        view=|| view! { <Layout><ProjectListPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("projects"), StaticSegment("new"))
                        view=|| view! { <Layout><ProjectRegisterPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("projects"), StaticSegment("edit"), ParamSegment("project_id"))
                        view=|| view! { <Layout><ProjectEditPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("projects"), ParamSegment("project_id"))
                        view=|| view! { <Layout><ProjectDetailPage /></Layout> }
                    />

                    <Route
                        path=StaticSegment("licenses")
                        view=|| view! { <Layout><LicenseListPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("licenses"), StaticSegment("new"))
                        view=|| view! { <Layout><LicenseRegisterPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("licenses"), StaticSegment("edit"), ParamSegment("license_id"))
                        view=|| view! { <Layout><LicenseEditPage /></Layout> }
                    />

                    <Route
                        path=StaticSegment("apps")
                        view=|| view! { <Layout><AppListPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("apps"), StaticSegment("new"))
                        view=|| view! { <Layout><AppRegisterPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("apps"), StaticSegment("edit"), ParamSegment("app_id"))
                        view=|| view! { <Layout><AppEditPage /></Layout> }
                    />

                    <Route
                        path=StaticSegment("users")
                        view=|| view! { <Layout><UserListPage /></Layout> }
                    />
                    <Route
                        path=(StaticSegment("users"), StaticSegment("new"))
                        view=|| view! { <Layout><UserRegisterPage /></Layout> }
                    />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

/// Signed-in chrome: sidebar, top bar and the page body.
#[component]
fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <div class="main-column">
                <Header />
                <main class="main-content">{children()}</main>
            </div>
        </div>
    }
}
