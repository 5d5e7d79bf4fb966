use dioxus::prelude::*;

use store::AppConfig;
use ui::{ApiProvider, AuthProvider, QueryProvider, SnackbarProvider, TAILWIND_CSS};
use views::{
    AppLayout, Cheatsheets, EventAdmin, EventDetail, Events, FeedbackPage, FormPage,
    ForgotPassword, Galleries, GalleryDetail, GroupDetail, Groups, JobPostAdmin, JobPostDetail,
    JobPosts, Landing, Login, NewsAdmin, NewsDetail, NewsList, NotFound, Profile, QrCodes,
    ShortLinks, SignUp, StrikeAdmin, ToddelArchive, UserAdmin,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Landing {},
        #[route("/arrangementer")]
        Events {},
        #[route("/arrangementer/:id")]
        EventDetail { id: i64 },
        #[route("/nyheter")]
        NewsList {},
        #[route("/nyheter/:id")]
        NewsDetail { id: i64 },
        #[route("/karriere")]
        JobPosts {},
        #[route("/karriere/:id")]
        JobPostDetail { id: i64 },
        #[route("/grupper")]
        Groups {},
        #[route("/grupper/:slug")]
        GroupDetail { slug: String },
        #[route("/profil")]
        Profile {},
        #[route("/galleri")]
        Galleries {},
        #[route("/galleri/:id")]
        GalleryDetail { id: String },
        #[route("/sporreskjema/:id")]
        FormPage { id: String },
        #[route("/qr-koder")]
        QrCodes {},
        #[route("/tilbakemelding")]
        FeedbackPage {},
        #[route("/linker")]
        ShortLinks {},
        #[route("/toddel")]
        ToddelArchive {},
        #[route("/kokebok")]
        Cheatsheets {},
        #[route("/logg-inn")]
        Login {},
        #[route("/glemt-passord")]
        ForgotPassword {},
        #[route("/ny-bruker")]
        SignUp {},
        #[nest("/admin")]
            #[route("/arrangementer")]
            EventAdmin {},
            #[route("/nyheter")]
            NewsAdmin {},
            #[route("/karriere")]
            JobPostAdmin {},
            #[route("/brukere")]
            UserAdmin {},
            #[route("/prikker")]
            StrikeAdmin {},
        #[end_nest]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let result = tokio::runtime::Runtime::new().and_then(|runtime| runtime.block_on(launch_server()));
        if let Err(e) = result {
            eprintln!("server error: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

/// Serve the bundled client. The app talks to the REST API directly from the
/// browser, so the server only renders and ships assets.
#[cfg(feature = "server")]
async fn launch_server() -> std::io::Result<()> {
    use dioxus::server::{DioxusRouterExt, ServeConfig};

    dotenvy::dotenv().ok();
    if let Err(e) = tracing_subscriber::fmt().try_init() {
        eprintln!("Failed to install tracing subscriber: {e}");
    }

    let router = axum::Router::new().serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await
}

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::load);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: TAILWIND_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ApiProvider {
            config: config.api.clone(),
            QueryProvider {
                config: config.cache.clone(),
                AuthProvider {
                    SnackbarProvider {
                        config: config.snackbar.clone(),
                        Router::<Route> {}
                    }
                }
            }
        }
    }
}
