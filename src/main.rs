mod config;
mod error;
mod http;
mod pages;
mod storage;
mod testing;
mod ui;

use std::fmt::{self, Display};

use clap::Parser;
use iced::widget::{column, container};
use iced::{Element, Length, Task};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, CliArgs, DEFAULT_LOG_FILTER};
use http::client::BackendClient;
use pages::dashboard::{self, DashboardPage};
use pages::registered::{self, RegisteredPage};
use pages::registration::{self, RegistrationPage};
use pages::results::{self, ResultsPage};
use pages::{Context, Navigation, Outcome};
use ui::style;

/// Oldest entries are dropped past this depth.
const MAX_BACK_STACK: usize = 32;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .init();

    let config = match AppConfig::from_args(CliArgs::parse()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };
    info!(
        backend = %config.backend_url,
        route = config.initial_route.path(),
        downloads = %config.downloads_dir.display(),
        "starting fastapi-tester v{}",
        env!("CARGO_PKG_VERSION")
    );

    iced::application("FastAPI Tester", update, view)
        .theme(|_| style::app_theme())
        .window_size((1180.0, 860.0))
        .run_with(move || App::new(config))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Registration,
    Dashboard,
    RegisteredServices,
    Results,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Registration,
        Route::Dashboard,
        Route::RegisteredServices,
        Route::Results,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Registration => "/",
            Route::Dashboard => "/dashboard",
            Route::RegisteredServices => "/registered-apis",
            Route::Results => "/results",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Route::Registration => "Register",
            Route::Dashboard => "Dashboard",
            Route::RegisteredServices => "Registered APIs",
            Route::Results => "Results",
        };
        write!(f, "{label}")
    }
}

/// The mounted page. Replacing it drops the previous page's state.
enum Page {
    Registration(RegistrationPage),
    Dashboard(DashboardPage),
    RegisteredServices(RegisteredPage),
    Results(ResultsPage),
}

impl Page {
    fn route(&self) -> Route {
        match self {
            Page::Registration(_) => Route::Registration,
            Page::Dashboard(_) => Route::Dashboard,
            Page::RegisteredServices(_) => Route::RegisteredServices,
            Page::Results(_) => Route::Results,
        }
    }
}

struct App {
    ctx: Context,
    page: Page,
    back_stack: Vec<Route>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    Back,
    Registration(registration::Message),
    Registered(registered::Message),
    Dashboard(dashboard::Message),
    Results(results::Message),
}

impl App {
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let ctx = Context {
            client: BackendClient::new(config.backend_url),
            downloads_dir: config.downloads_dir,
        };
        debug!(backend = ctx.client.base_url(), "backend client ready");
        let (page, task) = mount(Navigation::to(config.initial_route), &ctx);

        (
            Self {
                ctx,
                page,
                back_stack: Vec::new(),
            },
            task,
        )
    }

    fn navigate(&mut self, navigation: Navigation) -> Task<Message> {
        if self.back_stack.len() >= MAX_BACK_STACK {
            self.back_stack.remove(0);
        }
        self.back_stack.push(self.page.route());
        self.show(navigation)
    }

    fn back(&mut self) -> Task<Message> {
        let route = self.back_stack.pop().unwrap_or(Route::Registration);
        self.show(Navigation::to(route))
    }

    fn show(&mut self, navigation: Navigation) -> Task<Message> {
        debug!(route = navigation.route.path(), with_results = navigation.bundle.is_some(), "navigating");
        let (page, task) = mount(navigation, &self.ctx);
        self.page = page;
        task
    }

    fn apply<M>(&mut self, outcome: Outcome<M>, wrap: fn(M) -> Message) -> Task<Message>
    where
        M: Send + 'static,
    {
        match outcome {
            Outcome::None => Task::none(),
            Outcome::Task(task) => task.map(wrap),
            Outcome::Navigate(navigation) => self.navigate(navigation),
            Outcome::Back => self.back(),
        }
    }
}

fn mount(navigation: Navigation, ctx: &Context) -> (Page, Task<Message>) {
    match navigation.route {
        Route::Registration => (Page::Registration(RegistrationPage::default()), Task::none()),
        Route::Dashboard => (Page::Dashboard(DashboardPage::default()), Task::none()),
        Route::RegisteredServices => {
            let (page, task) = RegisteredPage::new(ctx);
            (Page::RegisteredServices(page), task.map(Message::Registered))
        }
        Route::Results => (Page::Results(ResultsPage::new(navigation.bundle)), Task::none()),
    }
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Navigate(route) => {
            if route == app.page.route() {
                return Task::none();
            }
            app.navigate(Navigation::to(route))
        }
        Message::Back => app.back(),
        Message::Registration(message) => match &mut app.page {
            Page::Registration(page) => {
                let outcome = page.update(message, &app.ctx);
                app.apply(outcome, Message::Registration)
            }
            _ => discard_stale(Route::Registration),
        },
        Message::Registered(message) => match &mut app.page {
            Page::RegisteredServices(page) => {
                let outcome = page.update(message);
                app.apply(outcome, Message::Registered)
            }
            _ => discard_stale(Route::RegisteredServices),
        },
        Message::Dashboard(message) => match &mut app.page {
            Page::Dashboard(page) => {
                let outcome = page.update(message, &app.ctx);
                app.apply(outcome, Message::Dashboard)
            }
            _ => discard_stale(Route::Dashboard),
        },
        Message::Results(message) => match &mut app.page {
            Page::Results(page) => {
                let outcome = page.update(message, &app.ctx);
                app.apply(outcome, Message::Results)
            }
            _ => discard_stale(Route::Results),
        },
    }
}

/// A reply addressed to a page that has since been unmounted.
fn discard_stale(route: Route) -> Task<Message> {
    debug!(route = route.path(), "dropping message for a page that is no longer shown");
    Task::none()
}

fn view(app: &App) -> Element<'_, Message> {
    let header = ui::header::view(app.page.route());

    let body = match &app.page {
        Page::Registration(page) => ui::registration::view(page).map(Message::Registration),
        Page::Dashboard(page) => ui::dashboard::view(page).map(Message::Dashboard),
        Page::RegisteredServices(page) => ui::registered::view(page).map(Message::Registered),
        Page::Results(page) => ui::results::view(page).map(Message::Results),
    };

    let layout = column![
        header,
        container(body).width(Length::Fill).height(Length::Fill)
    ]
    .spacing(1)
    .height(Length::Fill)
    .width(Length::Fill);

    container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::BG))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::http::response::RegisteredService;

    fn app_at(route: Route) -> App {
        let config = AppConfig {
            backend_url: "http://127.0.0.1:1".to_string(),
            initial_route: route,
            downloads_dir: std::env::temp_dir(),
        };
        App::new(config).0
    }

    #[test]
    fn routes_map_to_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path(""), Some(Route::Registration));
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn direct_visit_to_results_shows_nothing() {
        let app = app_at(Route::Results);
        assert!(matches!(&app.page, Page::Results(page) if !page.has_results()));
    }

    #[test]
    fn header_navigation_and_back() {
        let mut app = app_at(Route::Registration);

        let _ = update(&mut app, Message::Navigate(Route::Dashboard));
        assert_eq!(app.page.route(), Route::Dashboard);

        let _ = update(&mut app, Message::Back);
        assert_eq!(app.page.route(), Route::Registration);

        let _ = update(&mut app, Message::Back);
        assert_eq!(app.page.route(), Route::Registration);
    }

    #[test]
    fn navigating_away_discards_page_state() {
        let mut app = app_at(Route::Registration);
        let _ = update(
            &mut app,
            Message::Registration(registration::Message::UrlChanged("http://svc".to_string())),
        );

        let _ = update(&mut app, Message::Navigate(Route::Dashboard));
        let _ = update(&mut app, Message::Back);

        assert!(matches!(&app.page, Page::Registration(page) if page.service_url.is_empty()));
    }

    #[test]
    fn registered_row_opens_results_and_back_returns() {
        let mut app = app_at(Route::RegisteredServices);
        let rows = vec![RegisteredService {
            url: "http://svc:8001".to_string(),
            test_style: "bdd".to_string(),
            registration_time: "2024-03-01T09:30:00".to_string(),
            last_test_result: true,
        }];

        let _ = update(&mut app, Message::Registered(registered::Message::Loaded(Ok(rows))));
        let _ = update(&mut app, Message::Registered(registered::Message::ViewResultsPressed(0)));

        let Page::Results(page) = &app.page else {
            panic!("expected results page");
        };
        assert!(page.has_results());
        assert_eq!(page.bundle.as_ref().unwrap().service.as_ref().unwrap().test_style, "bdd");

        let _ = update(&mut app, Message::Results(results::Message::BackPressed));
        assert!(matches!(
            &app.page,
            Page::RegisteredServices(page) if page.state == registered::LoadState::Loading
        ));
    }

    #[test]
    fn replies_for_unmounted_pages_are_dropped() {
        let mut app = app_at(Route::Dashboard);

        let _ = update(
            &mut app,
            Message::Registration(registration::Message::SpecFetched(Err(ClientError::Transport(
                "refused".to_string(),
            )))),
        );

        assert_eq!(app.page.route(), Route::Dashboard);
    }

    #[test]
    fn back_stack_is_bounded() {
        let mut app = app_at(Route::Registration);
        for _ in 0..MAX_BACK_STACK {
            let _ = update(&mut app, Message::Navigate(Route::Dashboard));
            let _ = update(&mut app, Message::Navigate(Route::Registration));
        }
        assert_eq!(app.back_stack.len(), MAX_BACK_STACK);
    }
}
