//! Built-in catalog of Japanese prefectures.

use super::{RegionCatalog, RegionCatalogBuilder};

/// Tokyo's 23 special wards (postal prefixes 100–179).
pub const TOKYO_CORE: &str = "東京都(23区)";

/// The Tama area of Tokyo (postal prefixes 180–208).
pub const TOKYO_OUTER: &str = "東京都(多摩)";

/// Create the catalog of all 47 prefectures.
///
/// Representative points are the prefectural government offices. Tokyo is
/// additionally split into its ward area and the Tama area by postal code;
/// stations with no postal code fall in neither.
pub fn japan_prefectures() -> RegionCatalog {
    RegionCatalogBuilder::new()
        .region("北海道", 43.0642, 141.3469)
        .region("青森県", 40.8244, 140.7400)
        .region("岩手県", 39.7036, 141.1527)
        .region("宮城県", 38.2689, 140.8721)
        .region("秋田県", 39.7186, 140.1024)
        .region("山形県", 38.2404, 140.3633)
        .region("福島県", 37.7500, 140.4678)
        .region("茨城県", 36.3418, 140.4468)
        .region("栃木県", 36.5658, 139.8836)
        .region("群馬県", 36.3911, 139.0608)
        .region("埼玉県", 35.8569, 139.6489)
        .region("千葉県", 35.6047, 140.1233)
        .region("東京都", 35.6895, 139.6917)
        .region("神奈川県", 35.4478, 139.6425)
        .region("新潟県", 37.9026, 139.0236)
        .region("富山県", 36.6953, 137.2113)
        .region("石川県", 36.5947, 136.6256)
        .region("福井県", 36.0652, 136.2216)
        .region("山梨県", 35.6642, 138.5684)
        .region("長野県", 36.6513, 138.1810)
        .region("岐阜県", 35.3912, 136.7223)
        .region("静岡県", 34.9769, 138.3831)
        .region("愛知県", 35.1802, 136.9066)
        .region("三重県", 34.7303, 136.5086)
        .region("滋賀県", 35.0045, 135.8686)
        .region("京都府", 35.0214, 135.7556)
        .region("大阪府", 34.6863, 135.5200)
        .region("兵庫県", 34.6913, 135.1830)
        .region("奈良県", 34.6851, 135.8329)
        .region("和歌山県", 34.2260, 135.1675)
        .region("鳥取県", 35.5036, 134.2383)
        .region("島根県", 35.4723, 133.0505)
        .region("岡山県", 34.6617, 133.9350)
        .region("広島県", 34.3966, 132.4596)
        .region("山口県", 34.1859, 131.4714)
        .region("徳島県", 34.0658, 134.5593)
        .region("香川県", 34.3401, 134.0434)
        .region("愛媛県", 33.8416, 132.7657)
        .region("高知県", 33.5597, 133.5311)
        .region("福岡県", 33.6064, 130.4181)
        .region("佐賀県", 33.2494, 130.2988)
        .region("長崎県", 32.7448, 129.8737)
        .region("熊本県", 32.7898, 130.7417)
        .region("大分県", 33.2382, 131.6126)
        .region("宮崎県", 31.9111, 131.4239)
        .region("鹿児島県", 31.5602, 130.5581)
        .region("沖縄県", 26.2124, 127.6809)
        .postal_subdivision(TOKYO_CORE, "東京都", (35.6895, 139.6917), (100, 179))
        .postal_subdivision(TOKYO_OUTER, "東京都", (35.6939, 139.4077), (180, 208))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, RegionSelector, SubdivisionRule, TimeBudget};
    use crate::domain::station::station;

    #[test]
    fn all_prefectures_present() {
        let catalog = japan_prefectures();
        assert_eq!(catalog.len(), 47);
        assert!(catalog.region("北海道").is_some());
        assert!(catalog.region("沖縄県").is_some());
        assert_eq!(catalog.subdivisions().len(), 2);
    }

    #[test]
    fn tokyo_subdivisions_do_not_overlap() {
        let catalog = japan_prefectures();
        let core = &catalog.subdivision(TOKYO_CORE).unwrap().rule;
        let outer = &catalog.subdivision(TOKYO_OUTER).unwrap().rule;

        let shibuya = station("渋谷", "JR山手線", "東京都", "1500043", 35.658, 139.7016);
        let hachioji = station("八王子", "JR中央線", "東京都", "1920083", 35.6557, 139.3389);
        let oshima = station("岡田港", "架空航路", "東京都", "1000101", 34.78, 139.39);

        assert!(core.matches(&shibuya) && !outer.matches(&shibuya));
        assert!(outer.matches(&hachioji) && !core.matches(&hachioji));
        // 100-01xx island codes share the 100 prefix with Chiyoda
        assert!(core.matches(&oshima));
    }

    #[test]
    fn resolve_tokyo_areas() {
        let catalog = japan_prefectures();
        assert_eq!(
            catalog.resolve(TOKYO_CORE),
            Some(RegionSelector::RegionSubdivision {
                parent: "東京都".to_string(),
                rule: SubdivisionRule::PostalPrefix { min: 100, max: 179 },
            })
        );
    }

    #[test]
    fn shinjuku_half_hour_is_local() {
        let catalog = japan_prefectures();
        let shinjuku = Coordinate::new(35.6895, 139.6917);
        let reachable = catalog.reachable(shinjuku, TimeBudget::minutes(30), 80.0);

        for name in ["東京都", "神奈川県", "埼玉県", "千葉県"] {
            assert!(reachable.contains(name), "{name} should be reachable");
        }
        for name in ["大阪府", "北海道", "沖縄県"] {
            assert!(!reachable.contains(name), "{name} should not be reachable");
        }
    }
}
