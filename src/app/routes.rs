use crate::app::controllers::{
    ballot_controller, home_controller, profile_controller, result_controller, session_controller,
    voting_controller,
};
use actix_web::web;

pub fn setup_routes(cfg: &mut web::ServiceConfig) -> &mut web::ServiceConfig {
    cfg.service((
        home_controller::landing,
        home_controller::home,
    ))
    .service((
        session_controller::current_session,
        session_controller::connect,
        session_controller::disconnect,
    ))
    .service((
        voting_controller::create,
        voting_controller::remove,
        voting_controller::push_candidate,
        voting_controller::pull_candidate,
        voting_controller::manage,
    ))
    .service((
        ballot_controller::show,
        ballot_controller::cast,
        ballot_controller::request,
    ))
    .service((
        result_controller::show,
        profile_controller::show,
        profile_controller::mint,
        profile_controller::mint_batch,
    ))
}
