use crate::{dispatch::CommandDescriptor, utils::poise::Command};

macro_rules! list {
    ($($pub:vis $module:ident),+ $(,)?) => {
        $(
            $pub mod $module;
            use $module::$module;
        )+

        /// The poise side, registered with discord.
        ///
        /// Help text comes from the matching descriptor.
        pub fn list() -> Vec<Command> {
            let descriptors = descriptors();
            let mut commands = vec![$($module()),+];

            for command in &mut commands {
                if let Some(descriptor) = descriptors.iter().find(|d| d.name == command.name) {
                    describe(command, descriptor);
                }
            }

            commands
        }

        /// The dispatcher side, which does the actual work.
        pub fn descriptors() -> Vec<CommandDescriptor> {
            vec![$($module::descriptor()),+]
        }
    };
}

list! {
    greet,
    bootup,
    pub(crate) selfdestruct,
    threaten,
    loadout,
    diagnostic,
    protocol
}

fn describe(command: &mut Command, descriptor: &CommandDescriptor) {
    command.description = Some(descriptor.description.to_owned());

    for parameter in &mut command.parameters {
        let documented = descriptor
            .parameters
            .iter()
            .find(|documented| documented.name == parameter.name)
            .and_then(|documented| documented.description);

        if let Some(description) = documented {
            parameter.description = Some(description.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{dispatch::Dispatcher, services::Services};

    #[test]
    fn poise_commands_match_dispatcher() {
        let dispatcher =
            Dispatcher::standard(Services::test().shared()).expect("command names are unique");
        let commands = super::list();

        assert_eq!(commands.len(), super::descriptors().len());

        for command in commands {
            let parameters = dispatcher
                .parameters(&command.name)
                .unwrap_or_else(|| panic!("{} isn't dispatchable", command.name));

            let poise_names: Vec<_> =
                command.parameters.iter().map(|p| p.name.as_str()).collect();
            let dispatch_names: Vec<_> = parameters.iter().map(|p| p.name).collect();
            assert_eq!(poise_names, dispatch_names, "parameters of {}", command.name);
        }
    }

    #[test]
    fn descriptions_come_from_descriptors() {
        let commands = super::list();
        let threaten = commands
            .iter()
            .find(|command| command.name == "threaten")
            .expect("threaten is listed");

        assert_eq!(
            threaten.description.as_deref(),
            Some("Deathbot threatens a user.")
        );
        assert_eq!(
            threaten.parameters[0].description.as_deref(),
            Some("who to threaten")
        );

        for command in &commands {
            assert!(
                command.description.is_some(),
                "{} has no description",
                command.name
            );
        }
    }
}
