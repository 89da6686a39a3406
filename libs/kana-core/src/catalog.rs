//! The fixed kana catalog.
//!
//! Built once on first access and never mutated afterwards. Items are ordered
//! basic, voiced, semi-voiced, contracted; within a category they follow the
//! usual table order (row by row, vowel by vowel).

use crate::types::{Category, Example, Glyphs, KanaItem};
use std::collections::BTreeSet;
use std::sync::OnceLock;

type Cell = (&'static str, &'static str, &'static str);

const GAP: Cell = ("", "", "");

/// (romaji, hiragana, katakana), gaps left empty.
const BASIC_ROWS: [[Cell; 5]; 11] = [
    [("a", "あ", "ア"), ("i", "い", "イ"), ("u", "う", "ウ"), ("e", "え", "エ"), ("o", "お", "オ")],
    [("ka", "か", "カ"), ("ki", "き", "キ"), ("ku", "く", "ク"), ("ke", "け", "ケ"), ("ko", "こ", "コ")],
    [("sa", "さ", "サ"), ("shi", "し", "シ"), ("su", "す", "ス"), ("se", "せ", "セ"), ("so", "そ", "ソ")],
    [("ta", "た", "タ"), ("chi", "ち", "チ"), ("tsu", "つ", "ツ"), ("te", "て", "テ"), ("to", "と", "ト")],
    [("na", "な", "ナ"), ("ni", "に", "ニ"), ("nu", "ぬ", "ヌ"), ("ne", "ね", "ネ"), ("no", "の", "ノ")],
    [("ha", "は", "ハ"), ("hi", "ひ", "ヒ"), ("fu", "ふ", "フ"), ("he", "へ", "ヘ"), ("ho", "ほ", "ホ")],
    [("ma", "ま", "マ"), ("mi", "み", "ミ"), ("mu", "む", "ム"), ("me", "め", "メ"), ("mo", "も", "モ")],
    [("ya", "や", "ヤ"), GAP, ("yu", "ゆ", "ユ"), GAP, ("yo", "よ", "ヨ")],
    [("ra", "ら", "ラ"), ("ri", "り", "リ"), ("ru", "る", "ル"), ("re", "れ", "レ"), ("ro", "ろ", "ロ")],
    [("wa", "わ", "ワ"), GAP, GAP, GAP, ("wo", "を", "ヲ")],
    [GAP, GAP, GAP, GAP, ("n", "ん", "ン")],
];

/// (romaji, word, reading, meaning)
const BASIC_EXAMPLES: &[(&str, &str, &str, &str)] = &[
    ("a", "あさ", "asa", "morning"),
    ("i", "いえ", "ie", "house"),
    ("u", "うみ", "umi", "sea"),
    ("e", "えき", "eki", "station"),
    ("o", "おちゃ", "ocha", "tea"),
    ("ka", "かさ", "kasa", "umbrella"),
    ("ki", "きつね", "kitsune", "fox"),
    ("ku", "くも", "kumo", "cloud"),
    ("ke", "けむり", "kemuri", "smoke"),
    ("ko", "こえ", "koe", "voice"),
    ("sa", "さくら", "sakura", "cherry blossom"),
    ("shi", "しお", "shio", "salt"),
    ("su", "すし", "sushi", "sushi"),
    ("se", "せかい", "sekai", "world"),
    ("so", "そら", "sora", "sky"),
    ("ta", "たこ", "tako", "octopus"),
    ("chi", "ちず", "chizu", "map"),
    ("tsu", "つき", "tsuki", "moon"),
    ("te", "てがみ", "tegami", "letter"),
    ("to", "とり", "tori", "bird"),
    ("na", "なつ", "natsu", "summer"),
    ("ni", "にく", "niku", "meat"),
    ("nu", "ぬの", "nuno", "cloth"),
    ("ne", "ねこ", "neko", "cat"),
    ("no", "のり", "nori", "seaweed"),
    ("ha", "はな", "hana", "flower"),
    ("hi", "ひかり", "hikari", "light"),
    ("fu", "ふね", "fune", "boat"),
    ("he", "へや", "heya", "room"),
    ("ho", "ほし", "hoshi", "star"),
    ("ma", "まど", "mado", "window"),
    ("mi", "みず", "mizu", "water"),
    ("mu", "むし", "mushi", "insect"),
    ("me", "めがね", "megane", "glasses"),
    ("mo", "もり", "mori", "forest"),
    ("ya", "やま", "yama", "mountain"),
    ("yu", "ゆき", "yuki", "snow"),
    ("yo", "よる", "yoru", "night"),
    ("ra", "らくだ", "rakuda", "camel"),
    ("ri", "りんご", "ringo", "apple"),
    ("ru", "るす", "rusu", "absence"),
    ("re", "れきし", "rekishi", "history"),
    ("ro", "ろうそく", "rousoku", "candle"),
    ("wa", "わに", "wani", "crocodile"),
    ("wo", "をとこ", "otoko", "man"),
    ("n", "パン", "pan", "bread"),
];

/// (id, romaji, hiragana, katakana). ぢ and づ read like じ and ず, so they
/// keep distinct ids but share the transliteration.
const VOICED_ROWS: [[(&str, &str, &str, &str); 5]; 4] = [
    [("ga", "ga", "が", "ガ"), ("gi", "gi", "ぎ", "ギ"), ("gu", "gu", "ぐ", "グ"), ("ge", "ge", "げ", "ゲ"), ("go", "go", "ご", "ゴ")],
    [("za", "za", "ざ", "ザ"), ("ji", "ji", "じ", "ジ"), ("zu", "zu", "ず", "ズ"), ("ze", "ze", "ぜ", "ゼ"), ("zo", "zo", "ぞ", "ゾ")],
    [("da", "da", "だ", "ダ"), ("di", "ji", "ぢ", "ヂ"), ("du", "zu", "づ", "ヅ"), ("de", "de", "で", "デ"), ("do", "do", "ど", "ド")],
    [("ba", "ba", "ば", "バ"), ("bi", "bi", "び", "ビ"), ("bu", "bu", "ぶ", "ブ"), ("be", "be", "べ", "ベ"), ("bo", "bo", "ぼ", "ボ")],
];

const VOICED_EXAMPLES: [(&str, &str, &str); 4] = [
    ("がいこく", "gaikoku", "foreign country"),
    ("じしょ", "jisho", "dictionary"),
    ("でんしゃ", "densha", "train"),
    ("ばら", "bara", "rose"),
];

const SEMI_VOICED_ROW: [Cell; 5] = [
    ("pa", "ぱ", "パ"),
    ("pi", "ぴ", "ピ"),
    ("pu", "ぷ", "プ"),
    ("pe", "ぺ", "ペ"),
    ("po", "ぽ", "ポ"),
];

/// (romaji stem, hiragana i-kana, katakana i-kana)
const CONTRACTED_BASES: [Cell; 11] = [
    ("ky", "き", "キ"),
    ("sh", "し", "シ"),
    ("ch", "ち", "チ"),
    ("ny", "に", "ニ"),
    ("hy", "ひ", "ヒ"),
    ("my", "み", "ミ"),
    ("ry", "り", "リ"),
    ("gy", "ぎ", "ギ"),
    ("j", "じ", "ジ"),
    ("by", "び", "ビ"),
    ("py", "ぴ", "ピ"),
];

/// (vowel, small hiragana, small katakana)
const CONTRACTED_VOWELS: [Cell; 3] = [("a", "ゃ", "ャ"), ("u", "ゅ", "ュ"), ("o", "ょ", "ョ")];

static CATALOG: OnceLock<Vec<KanaItem>> = OnceLock::new();

/// Every item, in table order.
pub fn all() -> &'static [KanaItem] {
    CATALOG.get_or_init(build)
}

/// Look up an item by id.
pub fn get(id: &str) -> Option<&'static KanaItem> {
    all().iter().find(|item| item.id == id)
}

/// Items belonging to any of the given categories, in catalog order.
pub fn filter_by_categories(categories: &BTreeSet<Category>) -> Vec<&'static KanaItem> {
    all()
        .iter()
        .filter(|item| categories.contains(&item.category))
        .collect()
}

/// Browse grid for one category. Gaps in the table are `None`.
pub fn grid(category: Category) -> Vec<Vec<Option<&'static KanaItem>>> {
    let items: Vec<&KanaItem> = all().iter().filter(|i| i.category == category).collect();
    let rows = items.iter().map(|i| i.row + 1).max().unwrap_or(0);
    let cols = match category {
        Category::Contracted => CONTRACTED_VOWELS.len(),
        _ => 5,
    };

    let mut grid = vec![vec![None; cols]; rows];
    for item in items {
        grid[item.row][item.col] = Some(item);
    }
    grid
}

fn build() -> Vec<KanaItem> {
    let mut items = Vec::with_capacity(104);

    for (row, cells) in BASIC_ROWS.iter().enumerate() {
        for (col, &(romaji, hira, kata)) in cells.iter().enumerate() {
            if romaji.is_empty() {
                continue;
            }
            let example = BASIC_EXAMPLES
                .iter()
                .find(|(r, ..)| *r == romaji)
                .map(|&(_, word, reading, meaning)| example(word, reading, meaning))
                .unwrap_or_else(fallback_example);
            items.push(item(romaji, romaji, Category::Basic, hira, kata, example, row, col));
        }
    }

    for (row, cells) in VOICED_ROWS.iter().enumerate() {
        let (word, reading, meaning) = VOICED_EXAMPLES[row];
        for (col, &(id, romaji, hira, kata)) in cells.iter().enumerate() {
            let example = example(word, reading, meaning);
            items.push(item(id, romaji, Category::Voiced, hira, kata, example, row, col));
        }
    }

    for (col, &(romaji, hira, kata)) in SEMI_VOICED_ROW.iter().enumerate() {
        let example = example("パンダ", "panda", "panda");
        items.push(item(romaji, romaji, Category::SemiVoiced, hira, kata, example, 0, col));
    }

    for (row, &(stem, base_hira, base_kata)) in CONTRACTED_BASES.iter().enumerate() {
        for (col, &(vowel, small_hira, small_kata)) in CONTRACTED_VOWELS.iter().enumerate() {
            let romaji = format!("{stem}{vowel}");
            let hira = format!("{base_hira}{small_hira}");
            let kata = format!("{base_kata}{small_kata}");
            let example = Example {
                word: format!("{hira}くん"),
                reading: format!("{romaji}kun"),
                meaning: "nickname example".to_string(),
            };
            items.push(item(&romaji, &romaji, Category::Contracted, &hira, &kata, example, row, col));
        }
    }

    items
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    romaji: &str,
    category: Category,
    hiragana: &str,
    katakana: &str,
    example: Example,
    row: usize,
    col: usize,
) -> KanaItem {
    KanaItem {
        id: id.to_string(),
        category,
        glyphs: Glyphs {
            hiragana: hiragana.to_string(),
            katakana: katakana.to_string(),
        },
        transliteration: romaji.to_string(),
        example,
        row,
        col,
    }
}

fn example(word: &str, reading: &str, meaning: &str) -> Example {
    Example {
        word: word.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
    }
}

fn fallback_example() -> Example {
    example("ことば", "kotoba", "word")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_every_group() {
        let count = |c: Category| all().iter().filter(|i| i.category == c).count();
        assert_eq!(count(Category::Basic), 46);
        assert_eq!(count(Category::Voiced), 20);
        assert_eq!(count(Category::SemiVoiced), 5);
        assert_eq!(count(Category::Contracted), 33);
        assert_eq!(all().len(), 104);
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn homophones_share_transliteration() {
        assert_eq!(get("di").unwrap().transliteration, "ji");
        assert_eq!(get("du").unwrap().glyphs.hiragana, "づ");
        assert_eq!(get("ji").unwrap().glyphs.hiragana, "じ");
    }

    #[test]
    fn contracted_items_are_composed() {
        let item = get("kya").unwrap();
        assert_eq!(item.glyphs.hiragana, "きゃ");
        assert_eq!(item.glyphs.katakana, "キャ");
        assert_eq!(get("jo").unwrap().glyphs.hiragana, "じょ");
    }

    #[test]
    fn missing_examples_fall_back() {
        let ka = get("ka").unwrap();
        assert_eq!(ka.example.word, "かさ");
        assert!(all().iter().all(|i| !i.example.word.is_empty()));
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let cats = BTreeSet::from([Category::SemiVoiced, Category::Basic]);
        let pool = filter_by_categories(&cats);
        assert_eq!(pool.len(), 51);
        assert_eq!(pool[0].id, "a");
        assert_eq!(pool[50].id, "po");
    }

    #[test]
    fn filter_with_no_categories_is_empty() {
        assert!(filter_by_categories(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn basic_grid_has_gaps() {
        let grid = grid(Category::Basic);
        assert_eq!(grid.len(), 11);
        assert!(grid[7][1].is_none());
        assert_eq!(grid[7][2].unwrap().id, "yu");
        assert_eq!(grid[10][4].unwrap().id, "n");
    }

    #[test]
    fn contracted_grid_is_three_wide() {
        let grid = grid(Category::Contracted);
        assert_eq!(grid.len(), 11);
        assert!(grid.iter().all(|row| row.len() == 3 && row.iter().all(Option::is_some)));
    }
}
