// ==========================================
// 钣金加工报价系统 - 矩形排样引擎
// ==========================================
// 算法: 空闲矩形表 (MaxRects) + 最佳面积适配 (Best Area Fit)
// 输入: 分组平板件 + 板材规格 + 切割边距
// 输出: 一张或多张 SheetInstance, 每个零件副本恰好摆放一次
// 红线:
//   1) 相同输入必须得到相同排样(无随机、无哈希顺序)
//   2) AlignWithSheetLength 零件永不旋转
//   3) 零件与板边、零件与零件之间保留切割边距
// ==========================================
//
// 工作几何:
//   可用区域从 (m, m) 延伸到 (W, H); 每个副本按 (w + m, h + m) 占位,
//   因此右/下边界同样留出 m, 相邻零件之间间距 >= m。
//   排样结果中的坐标与尺寸是零件本身(不含占位边距)。

use crate::domain::part::FlatPart;
use crate::domain::sheet::{PlacedPart, SheetCatalogEntry, SheetInstance};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::nesting_aggregator::utilization_pct;
use std::cmp::Ordering;
use tracing::{instrument, trace};

/// 几何比较容差 (mm)
const EPS: f64 = 1e-6;

/// 排样图配色(仅用于显示)
const PALETTE: [&str; 10] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
    "#9C755F", "#BAB0AC",
];

// ==========================================
// FreeRect - 空闲矩形
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
struct FreeRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl FreeRect {
    fn right(&self) -> f64 {
        self.x + self.w
    }

    fn bottom(&self) -> f64 {
        self.y + self.h
    }

    fn area(&self) -> f64 {
        self.w * self.h
    }

    fn fits(&self, w: f64, h: f64) -> bool {
        w <= self.w + EPS && h <= self.h + EPS
    }

    fn intersects(&self, other: &FreeRect) -> bool {
        self.x < other.right() - EPS
            && other.x < self.right() - EPS
            && self.y < other.bottom() - EPS
            && other.y < self.bottom() - EPS
    }

    fn contains(&self, other: &FreeRect) -> bool {
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

// ==========================================
// 打开的板材(排样工作状态)
// ==========================================
// 板材与空闲矩形均以 Vec 存放、按下标引用
#[derive(Debug, Clone)]
struct OpenSheet {
    free_rects: Vec<FreeRect>,
    placements: Vec<PlacedPart>,
}

/// 待摆放的零件副本
#[derive(Debug, Clone, Copy)]
struct PieceCopy<'a> {
    part: &'a FlatPart,
    part_index: usize,
}

impl PieceCopy<'_> {
    fn area(&self) -> f64 {
        self.part.area_mm2()
    }

    fn long_side(&self) -> f64 {
        self.part.width_mm.max(self.part.height_mm)
    }

    /// 允许的摆放方向: false = 原方向, true = 旋转 90°
    fn orientations(&self) -> &'static [bool] {
        let square = (self.part.width_mm - self.part.height_mm).abs() <= EPS;
        if self.part.orientation.allows_rotation() && !square {
            &[false, true]
        } else {
            &[false]
        }
    }

    fn dims(&self, rotated: bool) -> (f64, f64) {
        if rotated {
            (self.part.height_mm, self.part.width_mm)
        } else {
            (self.part.width_mm, self.part.height_mm)
        }
    }
}

/// 候选位置评分: (剩余面积, 剩余短边), 越小越好
#[derive(Debug, Clone, Copy)]
struct Candidate {
    sheet_index: usize,
    free_index: usize,
    rotated: bool,
    area_fit: f64,
    short_side_fit: f64,
}

impl Candidate {
    fn better_than(&self, other: &Candidate) -> bool {
        match self.area_fit.total_cmp(&other.area_fit) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.short_side_fit < other.short_side_fit,
        }
    }
}

// ==========================================
// PackingResult - 单一板材规格下的排样结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PackingResult {
    pub sheet: SheetCatalogEntry,
    pub sheets: Vec<SheetInstance>,
}

impl PackingResult {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn placed_area_mm2(&self) -> f64 {
        self.sheets
            .iter()
            .flat_map(|s| s.placements.iter())
            .map(|p| p.area_mm2())
            .sum()
    }

    /// 废料面积 (mm²) = 消耗板材总面积 - 零件总面积
    pub fn waste_mm2(&self) -> f64 {
        let sheet_area = self.sheet.width_mm * self.sheet.height_mm * self.sheets.len() as f64;
        sheet_area - self.placed_area_mm2()
    }

    /// 择优比较: 板数优先, 废料面积次之
    pub fn compare_score(&self, other: &PackingResult) -> Ordering {
        self.sheet_count()
            .cmp(&other.sheet_count())
            .then_with(|| self.waste_mm2().total_cmp(&other.waste_mm2()))
    }
}

// ==========================================
// RectanglePacker - 矩形排样引擎
// ==========================================
pub struct RectanglePacker {
    margin_mm: f64,
}

impl RectanglePacker {
    pub fn new(margin_mm: f64) -> Self {
        Self {
            margin_mm: margin_mm.max(0.0),
        }
    }

    pub fn margin_mm(&self) -> f64 {
        self.margin_mm
    }

    /// 检查零件在给定板材上是否有可行方向
    pub fn part_fits(&self, part: &FlatPart, sheet: &SheetCatalogEntry) -> bool {
        let usable = self.initial_free_rect(sheet);
        let piece = PieceCopy {
            part,
            part_index: 0,
        };
        usable.w > EPS
            && usable.h > EPS
            && piece.orientations().iter().any(|&rotated| {
                let (w, h) = piece.dims(rotated);
                usable.fits(w + self.margin_mm, h + self.margin_mm)
            })
    }

    /// 排样: 将所有零件副本放到一张或多张板上
    ///
    /// # 参数
    /// - `parts`: 分组零件(按 quantity 展开)
    /// - `sheet`: 板材规格
    ///
    /// # 返回
    /// - Ok(PackingResult): 每个副本恰好出现一次
    /// - Err(EngineError): 板材不可用 / 零件超尺寸 / 零件尺寸无效
    #[instrument(skip(self, parts), fields(sheet_id = %sheet.sheet_id, parts = parts.len()))]
    pub fn pack(&self, parts: &[FlatPart], sheet: &SheetCatalogEntry) -> EngineResult<PackingResult> {
        let usable = self.initial_free_rect(sheet);
        if usable.w <= EPS || usable.h <= EPS {
            return Err(EngineError::UnusableSheet {
                sheet_id: sheet.sheet_id.clone(),
                margin_mm: self.margin_mm,
            });
        }

        // 1. 展开 + 预检
        let mut pieces = Vec::new();
        for (part_index, part) in parts.iter().enumerate() {
            if !(part.width_mm.is_finite()
                && part.height_mm.is_finite()
                && part.width_mm > 0.0
                && part.height_mm > 0.0)
            {
                return Err(EngineError::InvalidPart {
                    part_id: part.part_id.clone(),
                });
            }
            if part.quantity > 0 && !self.part_fits(part, sheet) {
                return Err(EngineError::PartTooLarge {
                    part_id: part.part_id.clone(),
                    width_mm: part.width_mm,
                    height_mm: part.height_mm,
                    sheet_id: sheet.sheet_id.clone(),
                });
            }
            for _ in 0..part.quantity.max(0) {
                pieces.push(PieceCopy { part, part_index });
            }
        }

        // 2. 排序: 面积降序 -> 长边降序 -> 输入顺序 (sort_by 为稳定排序)
        pieces.sort_by(|a, b| {
            b.area()
                .total_cmp(&a.area())
                .then_with(|| b.long_side().total_cmp(&a.long_side()))
                .then_with(|| a.part_index.cmp(&b.part_index))
        });

        // 3. 逐个摆放
        let mut open_sheets: Vec<OpenSheet> = Vec::new();
        for piece in &pieces {
            let candidate = match self.find_best(&open_sheets, piece) {
                Some(candidate) => candidate,
                None => {
                    // 4. 无处可放: 开新板
                    open_sheets.push(OpenSheet {
                        free_rects: vec![usable],
                        placements: Vec::new(),
                    });
                    let sheet_index = open_sheets.len() - 1;
                    self.find_best_in_sheet(&open_sheets[sheet_index], sheet_index, piece, None)
                        .ok_or_else(|| EngineError::PartTooLarge {
                            part_id: piece.part.part_id.clone(),
                            width_mm: piece.part.width_mm,
                            height_mm: piece.part.height_mm,
                            sheet_id: sheet.sheet_id.clone(),
                        })?
                }
            };
            self.place(&mut open_sheets[candidate.sheet_index], piece, &candidate);
        }

        let sheets: Vec<SheetInstance> = open_sheets
            .into_iter()
            .enumerate()
            .map(|(index, open)| {
                let placed_mm2: f64 = open.placements.iter().map(|p| p.area_mm2()).sum();
                SheetInstance {
                    index,
                    width_mm: sheet.width_mm,
                    height_mm: sheet.height_mm,
                    utilization_pct: utilization_pct(placed_mm2, sheet.width_mm * sheet.height_mm),
                    placements: open.placements,
                }
            })
            .collect();

        trace!(sheets = sheets.len(), pieces = pieces.len(), "排样完成");

        Ok(PackingResult {
            sheet: sheet.clone(),
            sheets,
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn initial_free_rect(&self, sheet: &SheetCatalogEntry) -> FreeRect {
        FreeRect {
            x: self.margin_mm,
            y: self.margin_mm,
            w: sheet.width_mm - self.margin_mm,
            h: sheet.height_mm - self.margin_mm,
        }
    }

    /// 在所有已开板中寻找最佳位置
    fn find_best(&self, open_sheets: &[OpenSheet], piece: &PieceCopy<'_>) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (sheet_index, open) in open_sheets.iter().enumerate() {
            best = self.find_best_in_sheet(open, sheet_index, piece, best);
        }
        best
    }

    fn find_best_in_sheet(
        &self,
        open: &OpenSheet,
        sheet_index: usize,
        piece: &PieceCopy<'_>,
        mut best: Option<Candidate>,
    ) -> Option<Candidate> {
        for (free_index, free) in open.free_rects.iter().enumerate() {
            for &rotated in piece.orientations() {
                let (w, h) = piece.dims(rotated);
                let (occupied_w, occupied_h) = (w + self.margin_mm, h + self.margin_mm);
                if !free.fits(occupied_w, occupied_h) {
                    continue;
                }
                let candidate = Candidate {
                    sheet_index,
                    free_index,
                    rotated,
                    area_fit: free.area() - occupied_w * occupied_h,
                    short_side_fit: (free.w - occupied_w).min(free.h - occupied_h),
                };
                // 严格更优才替换: 平分时保留较小的板下标/空闲矩形下标/未旋转
                if best.map_or(true, |b| candidate.better_than(&b)) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// 摆放零件并维护空闲矩形表
    fn place(&self, open: &mut OpenSheet, piece: &PieceCopy<'_>, candidate: &Candidate) {
        let free = open.free_rects[candidate.free_index];
        let (w, h) = piece.dims(candidate.rotated);

        open.placements.push(PlacedPart {
            part_id: piece.part.part_id.clone(),
            label: piece.part.label.clone(),
            x_mm: free.x,
            y_mm: free.y,
            width_mm: w,
            height_mm: h,
            rotated: candidate.rotated,
            color: PALETTE[piece.part_index % PALETTE.len()].to_string(),
        });

        let occupied = FreeRect {
            x: free.x,
            y: free.y,
            w: w + self.margin_mm,
            h: h + self.margin_mm,
        };
        split_free_rects(&mut open.free_rects, &occupied);
        prune_free_rects(&mut open.free_rects);
    }
}

/// 切分所有与占位矩形相交的空闲矩形(保留最大子矩形)
fn split_free_rects(free_rects: &mut Vec<FreeRect>, occupied: &FreeRect) {
    let mut next = Vec::with_capacity(free_rects.len() + 4);
    for free in free_rects.iter() {
        if !free.intersects(occupied) {
            next.push(*free);
            continue;
        }
        // 左
        if occupied.x > free.x + EPS {
            next.push(FreeRect {
                x: free.x,
                y: free.y,
                w: occupied.x - free.x,
                h: free.h,
            });
        }
        // 右
        if occupied.right() < free.right() - EPS {
            next.push(FreeRect {
                x: occupied.right(),
                y: free.y,
                w: free.right() - occupied.right(),
                h: free.h,
            });
        }
        // 上
        if occupied.y > free.y + EPS {
            next.push(FreeRect {
                x: free.x,
                y: free.y,
                w: free.w,
                h: occupied.y - free.y,
            });
        }
        // 下
        if occupied.bottom() < free.bottom() - EPS {
            next.push(FreeRect {
                x: free.x,
                y: occupied.bottom(),
                w: free.w,
                h: free.bottom() - occupied.bottom(),
            });
        }
    }
    *free_rects = next;
}

/// 删除被其他空闲矩形完全包含的矩形(相同矩形保留靠前的一个)
fn prune_free_rects(free_rects: &mut Vec<FreeRect>) {
    let n = free_rects.len();
    let mut keep = vec![true; n];
    for i in 0..n {
        if !keep[i] {
            continue;
        }
        for j in 0..n {
            if i == j || !keep[j] {
                continue;
            }
            let contained = free_rects[j].contains(&free_rects[i]);
            let identical = contained && free_rects[i].contains(&free_rects[j]);
            if contained && (!identical || j < i) {
                keep[i] = false;
                break;
            }
        }
    }
    let mut idx = 0;
    free_rects.retain(|_| {
        let k = keep[idx];
        idx += 1;
        k
    });
}
