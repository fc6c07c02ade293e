//! colinh CLI — Vietnamese practice teacher.
//!
//! ```text
//! colinh serve [--port 3000] [--host 127.0.0.1]
//! colinh ask "Xin chào" [--server http://localhost:3000]
//! colinh voice [--server ...] [--tts-url http://localhost:2003]
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};

use colinh_lib::client::TeacherClient;
use colinh_lib::colinh_core::types::ServerConfig;
use colinh_lib::server::{AppState, router};
use colinh_lib::voice::{Cycle, HttpPlayback, StdinCapture, VoiceTeacher};

/// colinh — rule-based Vietnamese teacher
#[derive(Parser)]
#[command(name = "colinh", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the teacher server
    Serve {
        /// Listen port
        #[arg(long, env = "COLINH_PORT", default_value = "3000")]
        port: u16,
        /// Listen host
        #[arg(long, env = "COLINH_HOST", default_value = "127.0.0.1")]
        host: String,
    },
    /// Send one sentence to the running server and print the reply
    Ask {
        /// Vietnamese sentence
        text: String,
        /// Server URL
        #[arg(long, env = "COLINH_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },
    /// Conversation loop: each stdin line is one utterance
    Voice {
        /// Server URL
        #[arg(long, env = "COLINH_SERVER", default_value = "http://localhost:3000")]
        server: String,
        /// TTS server to read replies aloud (POST /speak)
        #[arg(long, env = "COLINH_TTS_URL")]
        tts_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colinh=info,colinh_lib=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => {
            let config = ServerConfig { host, port };
            let app = router(AppState::default());

            let addr = config.addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!("colinh listening on http://{addr}");

            axum::serve(listener, app).await.context("server error")?;
        }

        Command::Ask { text, server } => {
            let reply = TeacherClient::new(server).ask(&text).await?;
            println!("{}", reply.reply);
        }

        Command::Voice { server, tts_url } => {
            let playback = tts_url.as_deref().map(HttpPlayback::new);
            let mut teacher =
                VoiceTeacher::new(TeacherClient::new(server), Some(StdinCapture::new()), playback);

            print_reply(teacher.session().reply());
            loop {
                eprintln!("🎤 Đang nghe...");
                match teacher.listen_once().await {
                    Cycle::Done => {}
                    Cycle::Exhausted | Cycle::Unavailable => break,
                }
                let session = teacher.session();
                if let Some(error) = session.error() {
                    println!("⚠️ {error}");
                } else {
                    print_reply(session.reply());
                }
            }
        }
    }

    Ok(())
}

fn print_reply(reply: Option<&str>) {
    if let Some(reply) = reply {
        println!("🌸 Cô Linh trả lời: {reply}");
    }
}
