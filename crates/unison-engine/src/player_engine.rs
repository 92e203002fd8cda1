/// Per-player note judgment engine, as seen by the coordinator.
///
/// Engines report phrase start/hit/miss to the coordinator and receive
/// exactly one call back when a unison phrase they took part in awards.
pub trait PlayerEngine {
    /// Grant this player the unison star power bonus.
    fn award_unison_bonus_star_power(&mut self);
}

impl<T: PlayerEngine + ?Sized> PlayerEngine for Box<T> {
    fn award_unison_bonus_star_power(&mut self) {
        (**self).award_unison_bonus_star_power();
    }
}
