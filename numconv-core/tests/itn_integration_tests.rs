//! ITN 集成测试
//!
//! 测试完整的转换管道

use numconv_core::itn::{
    convert, convert_ignoring_quantifiers, convert_with_changes, rollback, Language,
    LocaleProfile, NumeralNormalizer,
};

fn zh(text: &str) -> String {
    convert(text, LocaleProfile::shared(Language::Chinese))
}

fn ja(text: &str) -> String {
    convert(text, LocaleProfile::shared(Language::Japanese))
}

#[test]
fn test_complete_pipeline_chinese_sentences() {
    let cases = [
        (
            "截至二零二三年十二月，中国有十四亿一千七十七万八千七百二十四人，GDP超过两万五千五百亿人民币",
            "截至2023年12月，中国有1410778724人，GDP超过2550000000000人民币",
        ),
        (
            "今年的增长率为负三十五个百分点，需要负责人研究如何止住负增长趋势",
            "今年的增长率为-35个百分点，需要负责人研究如何止住负增长趋势",
        ),
        (
            "二百五加三百六等于六百一。三百零五加四十五等于三百五",
            "250加360等于610。305加45等于350",
        ),
        ("买这个电脑我花了一万五", "买这个电脑我花了15000"),
        (
            "pi等于三点一四一五九二六五三五，她的电话是一三五一二三四五六七八。",
            "pi等于3.1415926535，她的电话是13512345678。",
        ),
        ("给我推荐一个四五千的手机", "给我推荐1个4 5000的手机"),
        ("一百万五千九百九十五英镑", "1005995英镑"),
        ("他一个月的工资是三万两千元", "他1个月的工资是32000元"),
        (
            "刚刚清点了今天的收入，总共九万八千五百二十一点一零元",
            "刚刚清点了今天的收入，总共98521.10元",
        ),
        (
            "小米十三Pro十六加一百二十八G要三千九百九十九元，比红米K六零Pro贵",
            "小米13Pro16加128G要3999元，比红米K60Pro贵",
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(zh(input), expected, "input: {input}");
    }
}

#[test]
fn test_complete_pipeline_japanese_sentences() {
    let cases = [
        ("百一", "101"),
        ("千一", "1001"),
        ("一億二千万", "120000000"),
        ("負百", "-100"),
        ("マイナス百", "-100"),
        ("ゼロ", "0"),
        ("ゼロからの勉強", "0からの勉強"),
        ("今日は百一円を使いました", "今日は101円を使いました"),
        ("私の戦闘力は五十三万です", "私の戦闘力は530000です"),
        ("六百五", "605"),
        ("百十", "110"),
        ("一万五十", "10050"),
        ("一億二千三百四十五万六千七百八十九", "123456789"),
        ("欠損金は負二億です", "欠損金は-200000000です"),
        ("このパソコンは十九万八千円です", "このパソコンは198000円です"),
        ("千二十四", "1024"),
        ("一千二百三十四", "1234"),
        ("平成二十四年", "平成24年"),
    ];

    for (input, expected) in cases {
        assert_eq!(ja(input), expected, "input: {input}");
    }
}

#[test]
fn test_documented_properties() {
    assert_eq!(zh("一万五"), "15000");
    assert_eq!(zh("三百零五"), "305");
    assert_eq!(zh("一千零一十"), "1010");
    assert_eq!(zh("负三十五"), "-35");
    assert_eq!(ja("マイナス百"), "-100");
    assert_eq!(ja("ゼロ"), "0");
    assert_eq!(zh("十四亿一千七十七万八千七百二十四"), "1410778724");
    assert_eq!(zh("九万八千五百二十一点一零"), "98521.10");
    assert_eq!(ja("一万零五"), "10005");
    assert_eq!(zh("十两"), "10两");
    assert_eq!(zh("二十两"), "20两");
}

#[test]
fn test_text_without_numerals_is_identity() {
    for text in [
        "",
        "The quick brown fox",
        "今天天气很好，我们去公园吧！",
        "こんにちは、世界",
        "百分点",
        "emoji 🎉 and symbols ※★",
    ] {
        assert_eq!(zh(text), text);
    }
}

#[test]
fn test_odd_input_keeps_literals_and_rolls_back() {
    let inputs = [
        "负", "负负负", "点", "一点", "点点点", "零零零", "十十十", "万万", "亿", "マイナス",
        "マイナ", "ゼー", "ゼ", "一亿亿", "两两两两", "\u{0}", "壹拾贰万叁仟", "十两", "一点两",
        "一万零", "万零五",
    ];
    for text in inputs {
        for profile in [
            LocaleProfile::shared(Language::Chinese),
            LocaleProfile::shared(Language::Japanese),
        ] {
            let result = convert_with_changes(text, profile);

            // 未被转换的字符都原样保留在输出中
            let converted: usize = result
                .changes
                .iter()
                .map(|change| change.original_text.chars().count())
                .sum();
            let literal = text.chars().count() - converted;
            assert!(
                result.text.chars().count() >= literal,
                "{text:?} -> {:?}",
                result.text
            );
            assert_eq!(rollback(&result), text);
        }
    }
}

#[test]
fn test_unparsable_tokens_stay_literal() {
    assert_eq!(
        zh("负责人说：一共一万五，剩下的是点心"),
        "负责人说：1共15000，剩下的是点心"
    );
}

#[test]
fn test_spacing_between_numbers() {
    // 多位数相邻加空格，单个数字连写
    assert_eq!(zh("红米十二一百二十八GB"), "红米12 128GB");
    assert_eq!(zh("他的电话是一三八一二三四五六七八"), "他的电话是13812345678");
    assert_eq!(zh("三十五十"), "35 10");
}

#[test]
fn test_quantifier_protection() {
    let profile = LocaleProfile::shared(Language::Chinese);
    assert_eq!(
        convert_ignoring_quantifiers("给我买两三个榴莲", ["个"], profile),
        "给我买两三个榴莲"
    );
    assert_eq!(
        convert_ignoring_quantifiers("给我买两三个榴莲，花了一百二十元", ["个"], profile),
        "给我买两三个榴莲，花了120元"
    );
}

#[test]
fn test_change_tracking_and_rollback() {
    let profile = LocaleProfile::chinese();
    let original = "截至二零二三年十二月，GDP超过两万五千五百亿人民币";
    let result = convert_with_changes(original, &profile);

    assert_eq!(result.text, "截至2023年12月，GDP超过2550000000000人民币");
    assert_eq!(result.changes[0].original_text, "二");
    assert_eq!(result.changes.last().unwrap().original_text, "两万五千五百亿");
    assert_eq!(rollback(&result), original);
}

#[test]
fn test_normalizer_with_guard_rollback() {
    let engine = NumeralNormalizer::with_quantifiers(LocaleProfile::chinese(), ["个", "本"]).unwrap();
    let original = "买了五六本书和两三个本子，共花三十元";
    let result = engine.process(original);

    assert_eq!(result.text, "买了五六本书和两三个本子，共花30元");
    assert_eq!(result.changes.len(), 1);
    assert_eq!(NumeralNormalizer::rollback(&result), original);
}

#[test]
fn test_custom_vocabulary() {
    let profile = LocaleProfile::builder(Language::Chinese)
        .digits(
            ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"]
                .into_iter()
                .enumerate()
                .map(|(value, token)| (token, value as u8)),
        )
        .units(numconv_core::itn::Unit::TenThousand, ["万", "萬"])
        .build()
        .unwrap();

    assert_eq!(convert("二〇二四年", &profile), "2024年");
    assert_eq!(convert("三萬〇五", &profile), "30005");
    assert_eq!(convert("零", &profile), "零");
}
