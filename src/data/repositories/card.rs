use crate::data::models::Card;
use crate::schema::cards;
use diesel::prelude::*;

pub struct CardRepository;

impl CardRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        card_id: &str,
    ) -> Result<Option<Card>, diesel::result::Error> {
        cards::table
            .find(card_id)
            .select(Card::as_select())
            .first(conn)
            .optional()
    }

    /// Stores the card unless one with the same id already exists.
    pub fn create_if_absent(
        conn: &mut SqliteConnection,
        card: &Card,
    ) -> Result<bool, diesel::result::Error> {
        let inserted = diesel::insert_into(cards::table)
            .values(card)
            .on_conflict(cards::id)
            .do_nothing()
            .execute(conn)?;
        Ok(inserted > 0)
    }

    pub fn delete(conn: &mut SqliteConnection, card_id: &str) -> Result<usize, diesel::result::Error> {
        diesel::delete(cards::table.find(card_id)).execute(conn)
    }
}
