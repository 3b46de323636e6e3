use std::{convert::Infallible, sync::Arc};

use chrono::Local;
use percent_encoding::percent_decode_str;
use warp::{
    http::StatusCode,
    reject::Rejection,
    reply::{Reply, Response},
    Filter,
};

use crate::{
    catalog::Catalog,
    error::{not_found, ReportError},
    report::cache::ReportCache,
    stock::{
        aggregate::aggregate,
        count::{parse_submission, FormData},
    },
};

use super::pages;

const FORM_LIMIT: u64 = 1024 * 256;

pub fn with_catalog(
    catalog: Arc<Catalog>,
) -> impl Filter<Extract = (Arc<Catalog>,), Error = Infallible> + Clone {
    warp::any().map(move || catalog.clone())
}

pub fn with_cache(
    cache: ReportCache,
) -> impl Filter<Extract = (ReportCache,), Error = Infallible> + Clone {
    warp::any().map(move || cache.clone())
}

pub fn error_reply(error: potion::Error) -> Response {
    let status =
        StatusCode::from_u16(error.code as u16).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    warp::reply::with_status(error.info.unwrap_or_default(), status).into_response()
}

pub fn routes(
    catalog: Arc<Catalog>,
    cache: ReportCache,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_catalog(catalog.clone()))
        .map(|catalog: Arc<Catalog>| warp::reply::html(pages::index(&catalog)).into_response());

    let count = warp::path!("count" / String)
        .and(warp::get())
        .and(with_catalog(catalog))
        .and_then(count_page);

    let process = warp::path!("process")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::form::<FormData>())
        .and(with_cache(cache.clone()))
        .and_then(process_count);

    let pdf = warp::path!("pdf" / String)
        .and(warp::get())
        .and(with_cache(cache))
        .and_then(serve_pdf);

    index
        .or(count)
        .unify()
        .or(process)
        .unify()
        .or(pdf)
        .unify()
        .with(warp::log("cellar_run"))
}

async fn count_page(section: String, catalog: Arc<Catalog>) -> Result<Response, Rejection> {
    let name = percent_decode_str(&section).decode_utf8_lossy();

    match catalog.section(&name) {
        Some(section) => Ok(warp::reply::html(pages::count(section)).into_response()),
        None => {
            log::trace!("> Unknown section {name:?}");
            Ok(error_reply(not_found("Section not found")))
        }
    }
}

async fn process_count(form: FormData, cache: ReportCache) -> Result<Response, Rejection> {
    let entries = parse_submission(&form);
    let result = aggregate(&entries);
    log::info!(
        "> Processed {} of {} submitted counts",
        entries.len(),
        form.len()
    );

    let paired = result.paired.clone();
    let written = tokio::task::spawn_blocking(move || cache.write(&paired, Local::now()))
        .await
        .map_err(ReportError::from)
        .and_then(|written| written);

    match written {
        Ok(name) => {
            let url = format!("/pdf/{name}");
            Ok(warp::reply::html(pages::results(&result, Some(&url))).into_response())
        }
        Err(e) => {
            log::error!("> Failed to write report {e}");
            Ok(error_reply(e.into()))
        }
    }
}

async fn serve_pdf(name: String, cache: ReportCache) -> Result<Response, Rejection> {
    let Some(path) = cache.path_for(&name) else {
        return Ok(error_reply(not_found("Report not found")));
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(warp::reply::with_header(bytes, "content-type", "application/pdf")
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(error_reply(not_found("Report not found")))
        }
        Err(e) => Ok(error_reply(ReportError::from(e).into())),
    }
}
