use kifu_core::kifu::Kifu;
use kifu_core::{Ending, PieceType, SFEN_HIRATE};

const KIF: &str = "\
先手：先手太郎
後手：後手花子
手数----指手---------消費時間--
   1 ７六歩(77)   ( 0:03/00:00:03)
   2 ３四歩(33)   ( 0:05/00:00:05)
   3 ２二角成(88)   ( 0:10/00:00:13)
*角交換
   4 同　銀(31)   ( 0:02/00:00:07)
   5 投了
まで4手で後手の勝ち

変化：3手
   3 ６六歩(67)   ( 0:20/00:00:23)
";

const CSA: &str = "\
V2.2
N+先手太郎
N-後手花子
PI
+
+7776FU
T3
-3334FU
T5
+8822UM
T10
'*角交換
-3122GI
T2
%TORYO
";

#[test]
fn test_kif_and_csa_replay_to_the_same_main_line() {
    let kif = Kifu::from_kif(KIF).unwrap();
    let csa = Kifu::from_csa(CSA).unwrap();

    assert_eq!(kif.black_player, csa.black_player);
    assert_eq!(kif.white_player, csa.white_player);
    assert_eq!(csa.initial_position.as_deref(), Some(SFEN_HIRATE));
    assert_eq!(kif.main_line().unwrap().ending, Some(Ending::Toryo));
    assert_eq!(csa.main_line().unwrap().ending, Some(Ending::Toryo));

    let from_kif = kif.move_tree().unwrap();
    let from_csa = csa.move_tree().unwrap();
    assert_eq!(from_kif.len(), 4);
    assert_eq!(from_csa.len(), 4);
    for (a, b) in from_kif.iter().zip(&from_csa) {
        assert_eq!(a.mv, b.mv);
        assert_eq!(a.promotion, b.promotion);
        assert_eq!(a.captured, b.captured);
        assert_eq!(a.comment, b.comment);
        assert_eq!(a.time_spent_ms, b.time_spent_ms);
        assert_eq!(a.sfen, b.sfen);
    }

    assert_eq!(from_kif[2].captured, Some(PieceType::Bishop));
    assert_eq!(from_kif[2].comment.as_deref(), Some("角交換"));
    assert_eq!(from_kif[3].time_spent_ms, Some(2000));
    assert_eq!(from_kif[3].sfen, "lnsgkg1nl/1r5s1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/7R1/LNSGKGSNL b Bb 5");
}

#[test]
fn test_kif_variation_replays_from_before_the_replaced_move() {
    let kifu = Kifu::from_kif(KIF).unwrap();
    let tree = kifu.move_tree().unwrap();

    assert_eq!(tree[2].variations.len(), 1);
    let variation = &tree[2].variations[0];
    assert_eq!(variation.len(), 1);
    assert_eq!(variation[0].time_spent_ms, Some(20_000));
    assert_eq!(
        variation[0].sfen,
        "lnsgkgsnl/1r5b1/pppppp1pp/6p2/9/2PP5/PP2PPPPP/1B5R1/LNSGKGSNL w - 4"
    );
}

#[test]
fn test_imported_kifu_serializes_as_json_input() {
    let kifu = Kifu::from_kif(KIF).unwrap();
    let json = serde_json::to_string(&kifu).unwrap();
    let back: Kifu = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kifu);

    let value = serde_json::to_value(&kifu).unwrap();
    assert_eq!(value["branches"][0]["moves"][0]["time_spent_ms"], 3000);
    assert_eq!(value["branches"][0]["ending"], "TORYO");
    assert!(value["branches"][0]["moves"][1].get("comment").is_none());
}
