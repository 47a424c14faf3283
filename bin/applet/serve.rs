use anyhow::Error as Anyhow;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use clap::Parser;
use lib::chess::{Color, InvalidSquare, Move, Square};
use lib::service::{Service, ServiceError};
use lib::store::{Directory, InMemory, Snapshot, Storage};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::{net::TcpListener, runtime};
use tracing::{info, instrument};

/// Serves the game API over HTTP.
#[derive(Debug, Parser)]
pub struct Serve {
    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 5100)]
    port: u16,

    /// Keep games under this directory instead of in memory.
    #[clap(short, long)]
    store: Option<PathBuf>,
}

impl Default for Serve {
    fn default() -> Self {
        Serve {
            port: 5100,
            store: None,
        }
    }
}

type App = Arc<Service<Storage>>;

impl Serve {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let storage = match &self.store {
            None => Storage::from(InMemory::default()),
            Some(root) => Storage::from(Directory::new(root)?),
        };

        let app = Arc::new(Service::new(storage));

        let router = Router::new()
            .route("/games", get(names))
            .route("/games/{name}", post(create).get(state).delete(remove))
            .route("/games/{name}/turn", get(turn))
            .route("/games/{name}/moves/{row}/{col}", get(moves))
            .route("/games/{name}/captures/{row}/{col}", get(captures))
            .route("/games/{name}/move", post(play))
            .route("/games/{name}/reply", post(respond))
            .route("/games/{name}/cursor", put(seek))
            .with_state(app);

        runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(async {
                let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
                let listener = TcpListener::bind(addr).await?;
                info!(%addr, "listening");
                axum::serve(listener, router).await?;
                Ok(())
            })
    }
}

/// A side on the wire.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(s: Side) -> Self {
        match s {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl From<Color> for Side {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

/// A move on the wire.
#[derive(Debug, Copy, Clone, Serialize)]
struct MoveBody {
    from: [u8; 2],
    to: [u8; 2],
}

impl From<Move> for MoveBody {
    fn from(m: Move) -> Self {
        MoveBody {
            from: [m.whence().row(), m.whence().col()],
            to: [m.whither().row(), m.whither().col()],
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayRequest {
    from: [u8; 2],
    to: [u8; 2],
    side: Option<Side>,
}

#[derive(Debug, Serialize)]
struct TurnResponse {
    turn: Side,
}

#[derive(Debug, Serialize)]
struct ReplyResponse {
    #[serde(rename = "move")]
    reply: MoveBody,
    state: Snapshot,
}

#[derive(Debug, Deserialize)]
struct SeekRequest {
    cursor: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError(StatusCode, String);

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Occupied | ServiceError::OutOfTurn => StatusCode::CONFLICT,
            ServiceError::BadName => StatusCode::BAD_REQUEST,
            ServiceError::Illegal(_) | ServiceError::Cursor(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Stalled(_) => StatusCode::CONFLICT,
            ServiceError::Snapshot(_) | ServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        AppError(status, e.to_string())
    }
}

impl From<InvalidSquare> for AppError {
    fn from(e: InvalidSquare) -> Self {
        AppError(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorBody { error: self.1 })).into_response()
    }
}

async fn names(State(app): State<App>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(app.names()?))
}

async fn create(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<Snapshot>), AppError> {
    Ok((StatusCode::CREATED, Json(app.create(&name)?)))
}

async fn state(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(app.state(&name)?))
}

async fn remove(State(app): State<App>, Path(name): Path<String>) -> Result<StatusCode, AppError> {
    app.delete(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn turn(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<Json<TurnResponse>, AppError> {
    Ok(Json(TurnResponse {
        turn: app.turn(&name)?.into(),
    }))
}

async fn moves(
    State(app): State<App>,
    Path((name, row, col)): Path<(String, u8, u8)>,
) -> Result<Json<Vec<MoveBody>>, AppError> {
    let from = Square::try_from((row, col))?;
    Ok(Json(app.moves(&name, from)?.into_iter().map(Into::into).collect()))
}

async fn captures(
    State(app): State<App>,
    Path((name, row, col)): Path<(String, u8, u8)>,
) -> Result<Json<Vec<MoveBody>>, AppError> {
    let from = Square::try_from((row, col))?;
    let captures = app.captures(&name, from)?;
    Ok(Json(captures.into_iter().map(Into::into).collect()))
}

async fn play(
    State(app): State<App>,
    Path(name): Path<String>,
    Json(request): Json<PlayRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let from = Square::try_from((request.from[0], request.from[1]))?;
    let to = Square::try_from((request.to[0], request.to[1]))?;
    let side = request.side.map(Into::into);

    Ok(Json(app.play(&name, Move(from, to), side)?))
}

async fn respond(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<Json<ReplyResponse>, AppError> {
    let (reply, state) = app.respond(&name)?;

    Ok(Json(ReplyResponse {
        reply: reply.into(),
        state,
    }))
}

async fn seek(
    State(app): State<App>,
    Path(name): Path<String>,
    Json(request): Json<SeekRequest>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(app.seek(&name, request.cursor)?))
}
