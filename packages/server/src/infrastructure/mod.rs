//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装を提供する。
//!
//! - `kv`: 外部キーバリューストアの抽象とインメモリ実装
//! - `repository`: キーバリューストア上の Repository 実装
//! - `message_pusher`: WebSocket セッションへの送信
//! - `dto`: ワイヤフォーマット

pub mod dto;
pub mod kv;
pub mod message_pusher;
pub mod repository;
