//! Room エンティティ
//!
//! 対局ルームの状態遷移（入室・準備・着手・待った・投了・引き分け・退室）を
//! 純粋なメソッドとして実装する。ロック取得や永続化は UseCase 層が担当し、
//! ここではロード済みのルームを書き換えるだけ。
//!
//! ```text
//! OCCUPIED_WAITING --(challenger enters, both ready)--> STARTED
//! STARTED --(five / surrender / draw / escape)--> OCCUPIED_WAITING
//! OCCUPIED_WAITING --(lone host leaves)--> deleted
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::RuleViolation,
    five::{check_five, has_stone},
    value_object::{Color, Consent, PlayerId, Role, RoomId, Step},
};

use super::{
    dialog::{Dialog, DialogMsg},
    game_over::{Cause, GameOver},
    player::{Player, PlayerDetails},
};

/// Where a player sits in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Host,
    Challenger,
    /// Index into [`Room::spectators`].
    Spectator(usize),
}

/// Result of an accepted or relayed retraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retraction {
    /// The side that asked for the retraction.
    pub opponent: PlayerId,
    /// Number of steps removed (0 unless the consent was an acceptance).
    pub removed: usize,
}

/// What happened when a player left a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The player was not in the room; nothing changed.
    Absent,
    /// The lone host left. The room must be deleted and these spectators
    /// returned to the lobby.
    Deleted { spectators: Vec<Player> },
    /// The room survives. `game_over` is set when a live game was abandoned.
    Left { game_over: Option<GameOver> },
}

/// 対局ルーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub host: PlayerDetails,
    /// `None` while the challenger seat is free.
    pub challenger: Option<PlayerDetails>,
    pub spectators: Vec<Player>,
    pub started: bool,
    pub steps: Vec<Step>,
    pub dialog: Dialog,
}

impl Room {
    /// `host` が `color` を持つ新しいルームを作成
    pub fn new(id: RoomId, host: Player, color: Color) -> Self {
        Self {
            id,
            host: PlayerDetails::new(host, Role::Host, color),
            challenger: None,
            spectators: Vec::new(),
            started: false,
            steps: Vec::new(),
            dialog: Dialog::new(),
        }
    }

    /// Color the challenger seat plays with, occupied or not.
    pub fn challenger_color(&self) -> Color {
        self.host.color.opposite()
    }

    pub fn seat_of(&self, player_id: &PlayerId) -> Option<Seat> {
        if self.host.id() == player_id {
            return Some(Seat::Host);
        }
        if self.challenger.as_ref().is_some_and(|c| c.id() == player_id) {
            return Some(Seat::Challenger);
        }
        self.spectators
            .iter()
            .position(|p| &p.id == player_id)
            .map(Seat::Spectator)
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.seat_of(player_id).is_some()
    }

    /// Notification order: host, challenger, then spectators.
    pub fn member_ids(&self) -> Vec<PlayerId> {
        std::iter::once(self.host.id().clone())
            .chain(self.challenger.iter().map(|c| c.id().clone()))
            .chain(self.spectators.iter().map(|p| p.id.clone()))
            .collect()
    }

    /// Copy of the room without chat history, for players who just arrived.
    pub fn without_dialog(&self) -> Room {
        let mut view = self.clone();
        view.dialog.clear();
        view
    }

    /// プレイヤーを指定のロールで入室させる
    ///
    /// `player` の状態（観戦中など）は呼び出し側で更新済みであること。
    pub fn enter(&mut self, player: Player, role: Role) -> Result<(), RuleViolation> {
        if self.contains(&player.id) {
            return Err(RuleViolation::AlreadyInRoom {
                player: player.id.into_string(),
                room: self.id.clone(),
            });
        }
        match role {
            Role::Challenger => {
                if self.challenger.is_some() {
                    return Err(RuleViolation::SeatTaken(self.id.clone()));
                }
                self.challenger = Some(PlayerDetails::new(
                    player,
                    Role::Challenger,
                    self.challenger_color(),
                ));
            }
            Role::Spectator => self.spectators.push(player),
            Role::Host => return Err(RuleViolation::CannotEnterAs(Role::Host)),
        }
        Ok(())
    }

    /// 準備状態を切り替える。両者が準備完了になった瞬間に新しい対局が始まる。
    pub fn set_ready(&mut self, player_id: &PlayerId, ready: bool) -> Result<(), RuleViolation> {
        let seat = self.playing_seat(player_id)?;
        self.details_mut(seat)?.ready = ready;

        let both_ready = self.host.ready && self.challenger.as_ref().is_some_and(|c| c.ready);
        if both_ready && !self.started {
            self.steps.clear();
        }
        self.started = both_ready;
        Ok(())
    }

    /// Color that moves next.
    pub fn to_move(&self) -> Color {
        Color::of_step(self.steps.len())
    }

    /// 石を置き、五連が完成したら終局記録を返して次の対局に備える
    pub fn place(
        &mut self,
        player_id: &PlayerId,
        step: Step,
    ) -> Result<Option<GameOver>, RuleViolation> {
        if !self.started {
            return Err(RuleViolation::NotStarted(self.id.clone()));
        }
        let seat = self.playing_seat(player_id)?;
        if self.details(seat)?.color != self.to_move() {
            return Err(RuleViolation::NotYourTurn(player_id.to_string()));
        }
        if has_stone(step.i, step.j, Color::Black, &self.steps)
            || has_stone(step.i, step.j, Color::White, &self.steps)
        {
            return Err(RuleViolation::Occupied(step.i, step.j));
        }
        self.steps.push(step);

        let Some(color) = check_five(&self.steps) else {
            return Ok(None);
        };
        let game_over = match self.challenger.clone() {
            Some(challenger) if challenger.color == color => {
                GameOver::decided(self.id.clone(), challenger, self.host.clone(), Cause::Five)
            }
            Some(challenger) => {
                GameOver::decided(self.id.clone(), self.host.clone(), challenger, Cause::Five)
            }
            None => GameOver {
                rid: self.id.clone(),
                winner: Some(self.host.clone()),
                loser: None,
                cause: Cause::Five,
            },
        };
        self.prepare_new_game();
        Ok(Some(game_over))
    }

    /// 待ったの要求・応答を処理する
    ///
    /// `player_id` is the one answering. On [`Consent::Accept`] the requester's
    /// (the opponent's) last stone is undone; if the answering side moved last,
    /// its stone on top is undone too.
    pub fn retract(
        &mut self,
        player_id: &PlayerId,
        consent: Consent,
    ) -> Result<Retraction, RuleViolation> {
        if !self.started {
            return Err(RuleViolation::NotStarted(self.id.clone()));
        }
        if self.steps.is_empty() {
            return Err(RuleViolation::NoSteps(self.id.clone()));
        }
        let seat = self.playing_seat(player_id)?;
        let requester = self.opponent_of(seat)?;
        let (opponent, requester_color) = (requester.id().clone(), requester.color);

        if consent != Consent::Accept {
            return Ok(Retraction {
                opponent,
                removed: 0,
            });
        }
        let last_color = Color::of_step(self.steps.len() - 1);
        let removed = if last_color == requester_color { 1 } else { 2 };
        if removed > self.steps.len() {
            return Err(RuleViolation::NothingToRetract);
        }
        self.steps.truncate(self.steps.len() - removed);
        Ok(Retraction { opponent, removed })
    }

    /// 投了。相手の勝ちとして次の対局に備える
    pub fn surrender(&mut self, player_id: &PlayerId) -> Result<GameOver, RuleViolation> {
        if !self.started {
            return Err(RuleViolation::NotStarted(self.id.clone()));
        }
        let seat = self.playing_seat(player_id)?;
        let winner = self.opponent_of(seat)?.clone();
        let loser = self.details(seat)?.clone();
        self.prepare_new_game();
        Ok(GameOver::decided(self.id.clone(), winner, loser, Cause::Surrender))
    }

    /// 引き分けの要求・応答を処理する。承諾時のみ次の対局に備える。
    ///
    /// Returns the opponent's id, so the handshake can be relayed, and the
    /// termination record when the draw was accepted.
    pub fn draw(
        &mut self,
        player_id: &PlayerId,
        consent: Consent,
    ) -> Result<(PlayerId, Option<GameOver>), RuleViolation> {
        if !self.started {
            return Err(RuleViolation::NotStarted(self.id.clone()));
        }
        let seat = self.playing_seat(player_id)?;
        let opponent = self.opponent_of(seat)?.id().clone();
        if consent != Consent::Accept {
            return Ok((opponent, None));
        }
        self.prepare_new_game();
        Ok((opponent, Some(GameOver::draw(self.id.clone()))))
    }

    /// 退室処理
    pub fn leave(&mut self, player_id: &PlayerId) -> LeaveOutcome {
        let Some(seat) = self.seat_of(player_id) else {
            return LeaveOutcome::Absent;
        };
        match seat {
            Seat::Host => match self.challenger.take() {
                None => LeaveOutcome::Deleted {
                    spectators: std::mem::take(&mut self.spectators),
                },
                Some(mut challenger) => {
                    let game_over = self.started.then(|| {
                        GameOver::decided(
                            self.id.clone(),
                            challenger.clone(),
                            self.host.clone(),
                            Cause::Escape,
                        )
                    });
                    challenger.role = Role::Host;
                    challenger.ready = false;
                    self.host = challenger;
                    self.started = false;
                    LeaveOutcome::Left { game_over }
                }
            },
            Seat::Challenger => {
                let game_over = match self.challenger.take() {
                    Some(challenger) if self.started => Some(GameOver::decided(
                        self.id.clone(),
                        self.host.clone(),
                        challenger,
                        Cause::Escape,
                    )),
                    _ => None,
                };
                self.host.ready = false;
                self.started = false;
                LeaveOutcome::Left { game_over }
            }
            Seat::Spectator(index) => {
                self.spectators.remove(index);
                LeaveOutcome::Left { game_over: None }
            }
        }
    }

    /// ルームチャットに追加
    pub fn push_dialog(&mut self, msg: DialogMsg) {
        self.dialog.push(msg);
    }

    /// Clear ready flags, swap colors and stop the game.
    pub fn prepare_new_game(&mut self) {
        self.started = false;
        self.host.ready = false;
        self.host.color = self.host.color.opposite();
        if let Some(challenger) = self.challenger.as_mut() {
            challenger.ready = false;
            challenger.color = challenger.color.opposite();
        }
    }

    fn playing_seat(&self, player_id: &PlayerId) -> Result<Seat, RuleViolation> {
        match self.seat_of(player_id) {
            Some(seat @ (Seat::Host | Seat::Challenger)) => Ok(seat),
            _ => Err(RuleViolation::NotPlaying {
                player: player_id.to_string(),
                room: self.id.clone(),
            }),
        }
    }

    fn details(&self, seat: Seat) -> Result<&PlayerDetails, RuleViolation> {
        match seat {
            Seat::Host => Ok(&self.host),
            Seat::Challenger => self
                .challenger
                .as_ref()
                .ok_or_else(|| RuleViolation::NoOpponent(self.id.clone())),
            Seat::Spectator(_) => Err(RuleViolation::CannotEnterAs(Role::Spectator)),
        }
    }

    fn details_mut(&mut self, seat: Seat) -> Result<&mut PlayerDetails, RuleViolation> {
        let id = self.id.clone();
        match seat {
            Seat::Host => Ok(&mut self.host),
            Seat::Challenger => self
                .challenger
                .as_mut()
                .ok_or(RuleViolation::NoOpponent(id)),
            Seat::Spectator(_) => Err(RuleViolation::CannotEnterAs(Role::Spectator)),
        }
    }

    fn opponent_of(&self, seat: Seat) -> Result<&PlayerDetails, RuleViolation> {
        match seat {
            Seat::Host => self.details(Seat::Challenger),
            _ => Ok(&self.host),
        }
    }
}
