//! Mapping of schedule records into timeline groups and items.

use crate::models::{RecordKind, ScheduleRecord, TimelineGroup, TimelineItem};

/// Id of the single employee row.
pub const EMPLOYEE_GROUP_ID: &str = "employee";

/// Display height of the employee row.
pub const EMPLOYEE_GROUP_HEIGHT: u16 = 60;

/// Title used when a record carries neither a project nor an internal task.
pub const FALLBACK_TITLE: &str = "Untitled work item";

/// Background/border color pair for one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemColors {
    pub background: &'static str,
    pub border: &'static str,
}

pub const PROJECT_COLORS: ItemColors = ItemColors {
    background: "#1677ff",
    border: "#0958d9",
};

pub const INTERNAL_TASK_COLORS: ItemColors = ItemColors {
    background: "#52c41a",
    border: "#389e0d",
};

impl ItemColors {
    /// The fixed pair for a record kind.
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Project => PROJECT_COLORS,
            RecordKind::InternalTask => INTERNAL_TASK_COLORS,
        }
    }
}

/// Turns fetched records into renderable groups and items.
pub struct TimelineItemMapper;

impl TimelineItemMapper {
    /// The single employee row.
    pub fn map_groups(employee_display_name: &str) -> Vec<TimelineGroup> {
        vec![TimelineGroup {
            id: EMPLOYEE_GROUP_ID.to_string(),
            title: employee_display_name.to_string(),
            display_height: EMPLOYEE_GROUP_HEIGHT,
        }]
    }

    /// One item per record, in input order. Start and end are copied as-is;
    /// overlapping items are left for the surface to stack.
    pub fn map_items(records: &[ScheduleRecord]) -> Vec<TimelineItem> {
        records.iter().map(Self::map_item).collect()
    }

    fn map_item(record: &ScheduleRecord) -> TimelineItem {
        let colors = ItemColors::for_kind(record.kind);
        TimelineItem {
            id: record.id.clone(),
            group_id: EMPLOYEE_GROUP_ID.to_string(),
            title: item_title(record),
            start: record.start_time,
            end: record.end_time,
            background_color: colors.background,
            border_color: colors.border,
        }
    }
}

fn item_title(record: &ScheduleRecord) -> String {
    if record.kind == RecordKind::Project
        && let Some(project) = &record.project
    {
        return match &project.work_package {
            Some(wp) => format!("{} - {}", project.name, wp.name),
            None => project.name.clone(),
        };
    }

    match &record.internal_task {
        Some(task) => task.name.clone(),
        None => FALLBACK_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::{InternalTaskRef, ProjectRef, WorkPackageRef};

    fn record(kind: RecordKind) -> ScheduleRecord {
        ScheduleRecord {
            id: "r1".to_string(),
            employee_id: "e1".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 6, 9, 8, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 6, 9, 16, 0, 0).unwrap(),
            kind,
            project: None,
            internal_task: None,
        }
    }

    fn project(name: &str, work_package: Option<&str>) -> Option<ProjectRef> {
        Some(ProjectRef {
            name: name.to_string(),
            work_package: work_package.map(|n| WorkPackageRef {
                name: n.to_string(),
            }),
        })
    }

    #[test]
    fn test_map_groups_single_employee_row() {
        let groups = TimelineItemMapper::map_groups("Ada Lovelace");
        assert_eq!(
            groups,
            vec![TimelineGroup {
                id: "employee".to_string(),
                title: "Ada Lovelace".to_string(),
                display_height: 60,
            }]
        );
    }

    #[test]
    fn test_project_title_joins_project_and_work_package() {
        let mut r = record(RecordKind::Project);
        r.project = project("Apollo", Some("Telemetry"));

        let items = TimelineItemMapper::map_items(&[r]);
        assert_eq!(items[0].title, "Apollo - Telemetry");
        assert_eq!(items[0].background_color, PROJECT_COLORS.background);
        assert_eq!(items[0].border_color, PROJECT_COLORS.border);
    }

    #[test]
    fn test_project_without_work_package_uses_project_name() {
        let mut r = record(RecordKind::Project);
        r.project = project("Apollo", None);
        assert_eq!(TimelineItemMapper::map_items(&[r])[0].title, "Apollo");
    }

    #[test]
    fn test_internal_task_title_and_colors() {
        let mut r = record(RecordKind::InternalTask);
        r.internal_task = Some(InternalTaskRef {
            name: "QA Review".to_string(),
        });

        let items = TimelineItemMapper::map_items(&[r]);
        assert_eq!(items[0].title, "QA Review");
        assert_eq!(items[0].background_color, "#52c41a");
        assert_eq!(items[0].border_color, "#389e0d");
    }

    #[test]
    fn test_record_without_identity_uses_fallback_title() {
        for kind in [RecordKind::Project, RecordKind::InternalTask] {
            let items = TimelineItemMapper::map_items(&[record(kind)]);
            assert_eq!(items[0].title, FALLBACK_TITLE);
        }
    }

    #[test]
    fn test_project_kind_missing_project_falls_back_to_internal_task() {
        let mut r = record(RecordKind::Project);
        r.internal_task = Some(InternalTaskRef {
            name: "Onboarding".to_string(),
        });
        let items = TimelineItemMapper::map_items(&[r]);
        assert_eq!(items[0].title, "Onboarding");
        assert_eq!(items[0].background_color, PROJECT_COLORS.background);
    }

    #[test]
    fn test_items_copy_times_and_keep_order() {
        let first = record(RecordKind::InternalTask);
        let mut second = record(RecordKind::Project);
        second.id = "r2".to_string();
        second.start_time = first.start_time;
        second.end_time = first.end_time;

        let items = TimelineItemMapper::map_items(&[first.clone(), second]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "r1");
        assert_eq!(items[1].id, "r2");
        assert_eq!(items[0].start, first.start_time);
        assert_eq!(items[0].end, first.end_time);
        assert!(items.iter().all(|i| i.group_id == EMPLOYEE_GROUP_ID));
    }

    #[test]
    fn test_empty_records_map_to_no_items() {
        assert!(TimelineItemMapper::map_items(&[]).is_empty());
    }
}
