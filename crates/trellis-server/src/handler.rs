use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{Json, Redirect};
use serde::{Deserialize, Serialize};
use serde_json::json;

use trellis_present::PageContext;
use trellis_resolve::{Action, PathParser, ResolveError, HANDLE_MOUNT};
use trellis_types::{Bitstream, ContentNode, Handle, NodeId, NodeKind};

use crate::error::ServerError;
use crate::state::{AppState, ErrorPage};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "trellis-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Home page: top-level communities.
pub async fn home_handler(State(state): State<AppState>) -> Json<PageContext> {
    Json(state.pages().home())
}

/// `/handle/{prefix}/{suffix}[/edit]`: resolve and forward to the kind route.
///
/// The query string is carried over to the forward target.
pub async fn handle_handler(State(state): State<AppState>, uri: Uri) -> Result<Redirect, ErrorPage> {
    let dispatch = state
        .dispatcher()
        .dispatch(uri.path())
        .map_err(|e| state.error_page(e.into()))?;

    let target = match uri.query() {
        Some(query) => format!("{}?{query}", dispatch.route.path()),
        None => dispatch.route.path(),
    };
    tracing::debug!(path = %uri.path(), %target, "forwarding handle request");
    Ok(Redirect::to(&target))
}

fn object_page(
    state: &AppState,
    kind: NodeKind,
    action: Action,
    id: &str,
    uri: &Uri,
    query: &PageQuery,
) -> Result<Json<PageContext>, ErrorPage> {
    let id: NodeId = id.parse().map_err(|e: trellis_types::TypeError| {
        state.error_page(ResolveError::invalid_path(uri.path(), e.to_string()).into())
    })?;
    let node = state
        .dispatcher()
        .resolve_kind(kind, &id)
        .map_err(|e| state.error_page(e.into()))?;
    let page = query.page.unwrap_or(0);
    Ok(Json(state.pages().object(node, action, uri.path(), page)))
}

/// Report a rejected query string as a themed 400.
fn page_query(
    state: &AppState,
    uri: &Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<PageQuery, ErrorPage> {
    query.map(|Query(q)| q).map_err(|rejection| {
        state.error_page(ResolveError::invalid_path(uri.path(), rejection.body_text()).into())
    })
}

macro_rules! kind_handlers {
    ($($view:ident, $edit:ident => $kind:expr;)*) => {$(
        pub async fn $view(
            State(state): State<AppState>,
            Path(id): Path<String>,
            query: Result<Query<PageQuery>, QueryRejection>,
            uri: Uri,
        ) -> Result<Json<PageContext>, ErrorPage> {
            let query = page_query(&state, &uri, query)?;
            object_page(&state, $kind, Action::View, &id, &uri, &query)
        }

        pub async fn $edit(
            State(state): State<AppState>,
            Path(id): Path<String>,
            uri: Uri,
        ) -> Result<Json<PageContext>, ErrorPage> {
            object_page(&state, $kind, Action::Edit, &id, &uri, &PageQuery::default())
        }
    )*};
}

kind_handlers! {
    community_handler, community_edit_handler => NodeKind::Community;
    collection_handler, collection_edit_handler => NodeKind::Collection;
    item_handler, item_edit_handler => NodeKind::Item;
}

/// Descriptor of a file attached to an item.
#[derive(Debug, Serialize, Deserialize)]
pub struct BitstreamDescriptor {
    pub item: Handle,
    pub bitstream: Bitstream,
    pub retrieve: String,
}

/// `/bitstream/handle/{prefix}/{suffix}/{name}`: look up an item's file by name.
///
/// The path is matched after percent-decoding, so `annual%20report.pdf`
/// finds `annual report.pdf`.
pub async fn bitstream_handler(
    State(state): State<AppState>,
    rest: Result<Path<String>, PathRejection>,
    uri: Uri,
) -> Result<Json<BitstreamDescriptor>, ErrorPage> {
    let Path(rest) = rest.map_err(|rejection| {
        state.error_page(ResolveError::invalid_path(uri.path(), rejection.body_text()).into())
    })?;
    find_bitstream(&state, &rest)
        .map(Json)
        .map_err(|e| state.error_page(e))
}

/// `decoded` is everything after `/bitstream/handle/`, already decoded.
fn find_bitstream(state: &AppState, decoded: &str) -> Result<BitstreamDescriptor, ServerError> {
    let object = PathParser::new().parse(&format!("{HANDLE_MOUNT}{decoded}"))?;
    let handle = object.handle()?;
    let name = object.extra.trim_end_matches('/');

    let item = match state.dispatcher().resolve(&handle) {
        Ok(ContentNode::Item(item)) => item,
        Ok(_) | Err(_) => return Err(ServerError::not_found(format!("Item with handle {handle}"))),
    };

    let bitstream = item
        .bitstreams
        .iter()
        .find(|b| b.name == name)
        .cloned()
        .ok_or_else(|| ServerError::not_found(format!("Bitstream '{name}' on Item '{handle}'")))?;

    Ok(BitstreamDescriptor {
        item: handle,
        retrieve: format!("/retrieve/{}", bitstream.id),
        bitstream,
    })
}

/// Anything no route matches.
pub async fn fallback_handler(State(state): State<AppState>, uri: Uri) -> ErrorPage {
    state.error_page(ServerError::not_found(uri.path().to_string()))
}
