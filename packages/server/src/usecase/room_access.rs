//! ルームの読み込み・対局統計の更新など、複数の UseCase で共有する処理

use crate::domain::{
    Player, PlayerId, PlayerRepository, PlayerStatus, RepositoryError, Room, RoomGuard, RoomId,
    RoomLockRegistry, RoomRepository,
};

use super::error::MatchError;

/// ルームのロックを取得してからレコードを読み込む
///
/// The record is read only after the lock is held, so a room deleted while
/// this caller was waiting surfaces as `RoomNotFound`.
pub(crate) async fn locked_room(
    locks: &RoomLockRegistry,
    rooms: &dyn RoomRepository,
    room_id: &RoomId,
) -> Result<(RoomGuard, Room), MatchError> {
    let guard = locks.lock(room_id).await?;
    let room = rooms.get_room(room_id).await?;
    Ok((guard, room))
}

/// 終局した対局の参加者の対局数を 1 増やす。切断済みのプレイヤーは飛ばす。
pub(crate) async fn record_match<'a>(
    players: &dyn PlayerRepository,
    participants: impl IntoIterator<Item = &'a PlayerId>,
) -> Result<(), MatchError> {
    for player_id in participants {
        let change = Box::new(|player: &mut Player| player.matches_played += 1);
        match players.update_player(player_id, change).await {
            Ok(_) => {}
            Err(RepositoryError::PlayerNotFound(_)) => {
                tracing::debug!("Player '{}' left before the match was recorded", player_id);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// 観戦をやめたプレイヤーの状態を `leisure` に戻す。
/// 観戦中以外の状態は変えない。切断済みなら何もしない。
pub(crate) async fn back_to_leisure(
    players: &dyn PlayerRepository,
    player_id: &PlayerId,
) -> Result<(), MatchError> {
    let change = Box::new(|player: &mut Player| {
        if player.status == PlayerStatus::Spectating {
            player.status = PlayerStatus::Leisure;
        }
    });
    skip_missing(players.update_player(player_id, change).await)
}

/// 削除されたルームにいた観戦者を、現在の状態にかかわらず `leisure` にする。
/// 切断済みのプレイヤーは飛ばし、途中で失敗しても残りの観戦者は処理する。
pub(crate) async fn reset_to_leisure<'a>(
    players: &dyn PlayerRepository,
    spectators: impl IntoIterator<Item = &'a PlayerId>,
) -> Result<(), MatchError> {
    let mut first_error = None;
    for player_id in spectators {
        let change = Box::new(|player: &mut Player| player.status = PlayerStatus::Leisure);
        if let Err(e) = skip_missing(players.update_player(player_id, change).await) {
            tracing::error!("Failed to reset player '{}' to leisure: {}", player_id, e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn skip_missing(result: Result<Player, RepositoryError>) -> Result<(), MatchError> {
    match result {
        Ok(_) | Err(RepositoryError::PlayerNotFound(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
