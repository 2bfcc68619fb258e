use crate::calendar::CalendarEvent;

/// Events of one day column that share horizontal space, ordered by start.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapGroup<'a> {
    events: Vec<&'a CalendarEvent>,
}

impl<'a> OverlapGroup<'a> {
    pub fn events(&self) -> &[&'a CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events paired with their 0-based slot index within the group.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &'a CalendarEvent)> + '_ {
        self.events.iter().copied().enumerate()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.events.iter().map(|event| event.id.as_str()).collect()
    }
}

/// Clusters events by start time. An event joins the running group when it
/// starts before the *previous* event (in start order) ends; the group's
/// earliest event is not consulted. Equal start times keep input order.
pub fn group_overlapping<'a>(events: &[&'a CalendarEvent]) -> Vec<OverlapGroup<'a>> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.start);

    let mut groups = Vec::new();
    let mut current: Vec<&CalendarEvent> = Vec::new();

    for event in sorted {
        let joins = current
            .last()
            .is_some_and(|previous| event.start < previous.end);
        if !joins && !current.is_empty() {
            groups.push(OverlapGroup {
                events: std::mem::take(&mut current),
            });
        }
        current.push(event);
    }

    if !current.is_empty() {
        groups.push(OverlapGroup { events: current });
    }

    groups
}
