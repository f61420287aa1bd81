//! JSON round trips for the public value types.

use artbook_rs::{
    BookConfig, OrderCommand, RejectEvent, RejectReason, Side, TradeEvent,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_command_round_trips() {
        let cmd = OrderCommand {
            id: 42,
            side: Side::Bid,
            price: 101_250,
            size: 7,
            uid: 9_001,
            timestamp: 1_700_000_000_000,
            symbol: 3,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: OrderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn trade_event_round_trips() {
        let trade = TradeEvent {
            maker_id: 1,
            taker_id: 2,
            price: 100,
            size: 5,
            taker_side: Side::Ask,
            timestamp: 7,
        };
        let json = serde_json::to_string(&trade).unwrap();
        let back: TradeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
    }

    #[test]
    fn reject_event_round_trips() {
        for reason in [RejectReason::DuplicateId, RejectReason::InvalidSize] {
            let reject = RejectEvent { id: 9, reason };
            let json = serde_json::to_string(&reject).unwrap();
            let back: RejectEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, reject);
        }
    }

    #[test]
    fn book_config_round_trips_with_defaults() {
        let config = BookConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: BookConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.art.shrink.n16_to_n4, 3);
        assert_eq!(back.art.shrink.n48_to_n16, 12);
        assert_eq!(back.art.shrink.n256_to_n48, 37);
        assert_eq!(back.art.pool.n4, 256);
        assert_eq!(back.order_pool, 512);
    }

    #[test]
    fn side_serializes_as_a_tag() {
        assert_eq!(serde_json::to_string(&Side::Bid).unwrap(), "\"Bid\"");
        assert_eq!(serde_json::to_string(&Side::Ask).unwrap(), "\"Ask\"");
    }
}
