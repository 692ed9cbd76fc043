pub mod d001_actor_summary;
