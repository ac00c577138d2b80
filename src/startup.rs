use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::newsletter::{NewsletterComposer, NewsletterRenderer};
use crate::routes::{draft_newsletter, health_check, preview_newsletter, send_newsletter};

/// Rows may carry inline base64 images, so allow larger bodies than the default.
const JSON_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        let resolver = config.images.resolver()?;
        let composer = NewsletterComposer::new(config.branding)?;
        let renderer = NewsletterRenderer::new(resolver, composer);

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, renderer, email_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    renderer: NewsletterRenderer,
    email_client: EmailClient,
) -> Result<Server, anyhow::Error> {
    let renderer = web::Data::new(renderer);
    let email_client = web::Data::new(email_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/newsletters")
                    .route("/preview", web::post().to(preview_newsletter))
                    .route("/send", web::post().to(send_newsletter))
                    .route("/draft", web::post().to(draft_newsletter)),
            )
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .app_data(renderer.clone())
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
