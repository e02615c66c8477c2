use crate::dates::weekday_index;
use crate::models::{PlanDay, UserData};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Picks the plan day that applies to `date`, if any.
///
/// Scheduled weekdays are taken in ascending order and the n-th one maps to
/// plan day `n mod plan_days.len()`. The mapping depends only on the weekday,
/// so a given weekday gets the same plan day every week.
pub fn resolve_plan_day<'a>(
    date: NaiveDate,
    training_days: &BTreeSet<u8>,
    plan_days: &'a [PlanDay],
) -> Option<&'a PlanDay> {
    if plan_days.is_empty() || training_days.is_empty() {
        return None;
    }

    let weekday = weekday_index(date);
    let slot = training_days.iter().position(|day| *day == weekday)?;
    plan_days.get(slot % plan_days.len())
}

pub fn is_training_day(date: NaiveDate, training_days: &BTreeSet<u8>) -> bool {
    training_days.contains(&weekday_index(date))
}

impl UserData {
    pub fn plan_day_for(&self, date: NaiveDate) -> Option<&PlanDay> {
        resolve_plan_day(date, &self.training_days, &self.plan_days)
    }

    pub fn is_training_day(&self, date: NaiveDate) -> bool {
        is_training_day(date, &self.training_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::shift_days;

    // 2026-01-04 is a Sunday.
    fn weekday(index: i64) -> NaiveDate {
        shift_days(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(), index)
    }

    fn plan(names: &[&str]) -> Vec<PlanDay> {
        names
            .iter()
            .map(|name| PlanDay {
                id: format!("id-{name}"),
                name: name.to_string(),
                exercises: Vec::new(),
            })
            .collect()
    }

    fn days(indices: &[u8]) -> BTreeSet<u8> {
        indices.iter().copied().collect()
    }

    fn resolved_name(date: NaiveDate, schedule: &BTreeSet<u8>, plan_days: &[PlanDay]) -> Option<String> {
        resolve_plan_day(date, schedule, plan_days).map(|day| day.name.clone())
    }

    #[test]
    fn mon_wed_fri_with_two_plan_days_wraps() {
        let schedule = days(&[1, 3, 5]);
        let plan_days = plan(&["A", "B"]);

        assert_eq!(resolved_name(weekday(1), &schedule, &plan_days).as_deref(), Some("A"));
        assert_eq!(resolved_name(weekday(3), &schedule, &plan_days).as_deref(), Some("B"));
        assert_eq!(resolved_name(weekday(5), &schedule, &plan_days).as_deref(), Some("A"));
    }

    #[test]
    fn weekend_schedule_with_single_plan_day() {
        let schedule = days(&[0, 6]);
        let plan_days = plan(&["OnlyDay"]);

        assert_eq!(resolved_name(weekday(0), &schedule, &plan_days).as_deref(), Some("OnlyDay"));
        assert_eq!(resolved_name(weekday(6), &schedule, &plan_days).as_deref(), Some("OnlyDay"));
    }

    #[test]
    fn rest_days_resolve_to_none() {
        let schedule = days(&[1, 3, 5]);
        let plan_days = plan(&["A", "B", "C"]);

        for index in [0, 2, 4, 6] {
            assert!(resolve_plan_day(weekday(index), &schedule, &plan_days).is_none());
            assert!(!is_training_day(weekday(index), &schedule));
        }
    }

    #[test]
    fn empty_schedule_or_plan_resolves_to_none() {
        assert!(resolve_plan_day(weekday(1), &days(&[]), &plan(&["A"])).is_none());
        assert!(resolve_plan_day(weekday(1), &days(&[1]), &[]).is_none());
        assert!(is_training_day(weekday(1), &days(&[1])));
    }

    #[test]
    fn slot_is_position_in_sorted_schedule_for_every_combination() {
        for mask in 1u8..128 {
            let schedule: BTreeSet<u8> = (0..7).filter(|day| mask & (1 << day) != 0).collect();
            let sorted: Vec<u8> = schedule.iter().copied().collect();
            for plan_count in 1..=4 {
                let names: Vec<String> = (0..plan_count).map(|i| format!("P{i}")).collect();
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let plan_days = plan(&refs);

                for index in 0..7 {
                    let date = weekday(index);
                    let expected = sorted
                        .iter()
                        .position(|day| i64::from(*day) == index)
                        .map(|slot| format!("P{}", slot % plan_count));
                    assert_eq!(resolved_name(date, &schedule, &plan_days), expected);
                }
            }
        }
    }

    #[test]
    fn same_weekday_maps_to_same_plan_day_every_week() {
        let schedule = days(&[2, 4]);
        let plan_days = plan(&["A", "B", "C"]);

        for week in 0..10 {
            let tuesday = weekday(2 + week * 7);
            let thursday = weekday(4 + week * 7);
            assert_eq!(resolved_name(tuesday, &schedule, &plan_days).as_deref(), Some("A"));
            assert_eq!(resolved_name(thursday, &schedule, &plan_days).as_deref(), Some("B"));
        }
    }
}
