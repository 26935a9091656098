//! Human-readable dumps of the network state
//!
//! For operators only; nothing parses this output.

use crate::models::{ResourceSelector, TargetKind};
use crate::network::{LogisticsNetwork, Planner};
use crate::world::LogisticsWorld;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

impl LogisticsNetwork {
    /// Tables of the current requests and carriers
    pub fn summarize<W: LogisticsWorld + ?Sized>(&mut self, world: &W) -> String {
        let mut requests = Table::new();
        requests.load_preset(UTF8_BORDERS_ONLY);
        requests.set_header(vec!["Id", "Target", "Shape", "Resource", "Requested", "Current", "Targeted by", "Pos"]);
        for request in self.registry.requests() {
            let target = world.target(&request.target);
            let shape = match target.map(|t| &t.kind) {
                Some(TargetKind::Store { .. }) => "store",
                Some(TargetKind::SingleResource { .. }) => "single",
                Some(TargetKind::MultiCapacity { .. }) => "multi",
                None => "missing",
            };
            let current = match (target, &request.resource) {
                (Some(t), ResourceSelector::All) => t.holdings().total().to_string(),
                (Some(t), ResourceSelector::Single(resource)) => t.amount_of(resource).unwrap_or(0).to_string(),
                (None, _) => "-".to_string(),
            };
            let targeted_by: Vec<&str> = world
                .carriers_targeting(&request.target, None)
                .into_iter()
                .map(|carrier| carrier.id.as_str())
                .collect();
            requests.add_row(vec![
                request.id.to_string(),
                request.target.clone(),
                shape.to_string(),
                request.resource.to_string(),
                request.amount.to_string(),
                current,
                targeted_by.join(", "),
                request.pos.to_string(),
            ]);
        }

        let mut carriers = Table::new();
        carriers.load_preset(UTF8_BORDERS_ONLY);
        carriers.set_header(vec!["Carrier", "Pos", "Carry", "Target", "Availability"]);
        let planner = Planner::new(world, &self.config, &self.registry);
        for carrier in world.carriers() {
            let availability = planner.next_availability(&mut self.cache, carrier);
            carriers.add_row(vec![
                carrier.id.clone(),
                carrier.pos.to_string(),
                format!("{}/{}", carrier.carry.total(), carrier.capacity),
                carrier.target_ref().unwrap_or("none").to_string(),
                format!("available in {} ticks at {}", availability.ticks, availability.position),
            ]);
        }

        format!(
            "Logistics network {}\nRequests:\n{}\nCarriers:\n{}\n",
            self.domain, requests, carriers
        )
    }

    /// Matched pairs, then unmatched carriers, then unmatched requests
    pub fn summarize_matching<W: LogisticsWorld + ?Sized>(&mut self, world: &W) -> String {
        let matching = self.compute_matching(world).clone();
        let mut out = String::new();
        out.push_str(&format!("Stable matching for {}\n", self.domain));

        let describe_request = |id| {
            self.registry
                .get(id)
                .map(|r| format!("{} {} {}", r.target, r.pos, r.resource))
                .unwrap_or_default()
        };
        let describe_carrier = |id: &str| match world.carriers().iter().find(|c| c.id == id) {
            Some(carrier) => format!("{} {}", carrier.id, carrier.pos),
            None => id.to_string(),
        };

        for (carrier, &request) in &matching.assignments {
            out.push_str(&format!("{:<30} : {}\n", describe_carrier(carrier), describe_request(request)));
        }
        for carrier in &matching.unmatched_carriers {
            out.push_str(&format!("{:<30} : \n", describe_carrier(carrier)));
        }
        let matched = matching.matched_requests();
        for request in self.registry.requests().iter().filter(|r| !matched.contains(&r.id)) {
            out.push_str(&format!("{:<30} : {}\n", "", describe_request(request.id)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Carrier, Position, RequestOptions, ResourceType, Store, Target};
    use crate::network::LogisticsNetwork;
    use crate::world::Colony;

    #[test]
    fn test_summaries_mention_every_participant() {
        let spawn = Target::single("spawn", "W1N1", Position::new(5, 0), ResourceType::energy(), 0, 300);
        let world = Colony::new("W1N1")
            .with_target(spawn.clone())
            .with_carrier(Carrier::new("h1", Position::new(0, 0), 100).with_carry(Store::from_pairs([("energy", 100)])))
            .with_carrier(Carrier::new("h2", Position::new(9, 9), 100));
        let mut network = LogisticsNetwork::with_defaults("W1N1");
        network.request_input(&spawn, RequestOptions::new());

        let summary = network.summarize(&world);
        assert!(summary.contains("spawn"));
        assert!(summary.contains("available in 0 ticks"));

        let matching = network.summarize_matching(&world);
        assert!(matching.starts_with("Stable matching for W1N1"));
        assert!(matching.contains("h1 (0, 0)"));
        assert!(matching.contains("h2 (9, 9)"));

        let lines: Vec<&str> = matching.lines().collect();
        assert_eq!(lines.len(), 3, "header, one pair, one idle carrier");
        assert!(lines[1].starts_with("h1 (0, 0)") && lines[1].ends_with("spawn (5, 0) energy"));
        assert!(lines[2].starts_with("h2 (9, 9)"));
        assert!(matching.ends_with('\n'));
    }
}
